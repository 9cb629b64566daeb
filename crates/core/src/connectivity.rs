//! Connectivity module - path tracing through tile connectors
//!
//! Each tile opens two sides depending on its wire type and quarter-turn
//! rotation. Two grid-adjacent tiles are linked when both open toward each
//! other. Current enters the grid at the source endpoint and the circuit is
//! closed when the sink endpoint is reachable.
//!
//! The search is a breadth-first walk over at most 16 tiles using a fixed
//! capacity queue, so it never allocates.

use arrayvec::ArrayVec;

use crate::grid::TileGrid;
use crate::types::{Direction, Position, TileId, GRID_COLS, TILE_COUNT};

/// Where current enters or leaves the grid: a border tile and the side facing
/// the battery or bulb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Endpoint {
    pub position: Position,
    pub side: Direction,
}

impl Endpoint {
    pub const fn new(position: Position, side: Direction) -> Self {
        Self { position, side }
    }
}

/// Battery, west of the top-left tile
pub const BATTERY: Endpoint = Endpoint::new(Position::new(0, 0), Direction::West);

/// Bulb, east of the top-right tile
pub const BULB: Endpoint = Endpoint::new(Position::new(0, GRID_COLS - 1), Direction::East);

/// Set of tiles reached by current, one bit per tile id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PoweredSet(u32);

impl PoweredSet {
    pub fn contains(&self, id: TileId) -> bool {
        (id as usize) < TILE_COUNT && self.0 & (1 << id) != 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    fn insert(&mut self, id: TileId) -> bool {
        let fresh = !self.contains(id);
        self.0 |= 1 << id;
        fresh
    }
}

/// All tiles reachable from `source` through facing connectors.
///
/// Empty when the source tile does not open toward the source side.
pub fn powered_tiles(grid: &TileGrid, source: Endpoint) -> PoweredSet {
    let mut powered = PoweredSet::default();
    let Some(start) = grid.tile_at(source.position) else {
        return powered;
    };
    if !start.connectors().contains(source.side) {
        return powered;
    }

    let mut queue: ArrayVec<TileId, TILE_COUNT> = ArrayVec::new();
    powered.insert(start.id);
    queue.push(start.id);

    let mut head = 0;
    while head < queue.len() {
        let id = queue[head];
        head += 1;

        let Ok(tile) = grid.get_tile(id) else {
            continue;
        };
        let open = tile.connectors();
        for dir in Direction::ALL {
            if !open.contains(dir) {
                continue;
            }
            let Some(next) = tile.position.neighbor(dir).and_then(|p| grid.tile_at(p)) else {
                continue;
            };
            if next.connectors().contains(dir.opposite()) && powered.insert(next.id) {
                // Each tile is enqueued at most once, so the queue cannot overflow.
                queue.push(next.id);
            }
        }
    }

    powered
}

/// True when current entering at `source` can leave at `sink`.
pub fn path_exists(grid: &TileGrid, source: Endpoint, sink: Endpoint) -> bool {
    let Some(end) = grid.tile_at(sink.position) else {
        return false;
    };
    end.connectors().contains(sink.side) && powered_tiles(grid, source).contains(end.id)
}
