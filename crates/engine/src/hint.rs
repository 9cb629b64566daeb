use arrayvec::ArrayVec;

use tui_lightup_core::rng::RandomSource;
use tui_lightup_core::tile;
use tui_lightup_core::PuzzleSession;
use tui_lightup_types::{TileId, TILE_COUNT};

/// Rotations still needed on one tile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlanStep {
    pub tile_id: TileId,
    /// Clockwise quarter turns, 1..=3
    pub turns: u8,
}

/// Number of 90° clockwise rotations that take `from` exactly onto `to`.
///
/// `None` when no number of quarter turns lands on the target, which is the
/// case for every tile that started at a non-cardinal angle.
pub fn quarter_turns(from: f64, to: u16) -> Option<u8> {
    tile::quarter_turns(to as f64 - from)
}

/// Every required tile that is wrong but can still be fixed, row-major.
pub fn plan<R: RandomSource>(session: &PuzzleSession<R>) -> ArrayVec<PlanStep, TILE_COUNT> {
    let table = &session.config().table;
    let mut steps = ArrayVec::new();

    for tile in session.tiles() {
        let Some(target) = table.target(tile.position) else {
            continue;
        };
        match quarter_turns(tile.rotation, target) {
            Some(0) | None => {}
            Some(turns) => steps.push(PlanStep {
                tile_id: tile.id,
                turns,
            }),
        }
    }

    steps
}

/// The tile to rotate next, if any required tile can still be corrected.
pub fn next_hint<R: RandomSource>(session: &PuzzleSession<R>) -> Option<TileId> {
    plan(session).first().map(|step| step.tile_id)
}
