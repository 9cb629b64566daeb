use crate::types::{
    Position, RotationMode, SessionPhase, SessionStatus, TileId, Verdict, WireType, TILE_COUNT,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSnapshot {
    pub id: TileId,
    pub position: Position,
    pub wire: WireType,
    pub rotation: f64,
    pub selected: bool,
    pub verdict: Verdict,
    /// Reached by current from the battery
    pub powered: bool,
}

impl Default for TileSnapshot {
    fn default() -> Self {
        Self {
            id: 0,
            position: Position::default(),
            wire: WireType::Straight,
            rotation: 0.0,
            selected: false,
            verdict: Verdict::NotApplicable,
            powered: false,
        }
    }
}

/// Read-only view of a session, refreshed between actions.
///
/// Plain `Copy` data so renderers can keep one instance and overwrite it each
/// frame via `PuzzleSession::snapshot_into`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PuzzleSnapshot {
    pub tiles: [TileSnapshot; TILE_COUNT],
    pub attempts: u32,
    pub status: SessionStatus,
    pub phase: SessionPhase,
    pub correct: u8,
    pub required: u8,
    pub episode_id: u32,
    pub rotation_mode: RotationMode,
}

impl PuzzleSnapshot {
    pub fn clear(&mut self) {
        self.tiles = [TileSnapshot::default(); TILE_COUNT];
        for (i, tile) in self.tiles.iter_mut().enumerate() {
            tile.id = i as TileId;
            tile.position = Position::from_index(i).unwrap_or_default();
        }
        self.attempts = 0;
        self.status = SessionStatus::InProgress;
        self.phase = SessionPhase::Playing;
        self.correct = 0;
        self.required = 0;
        self.episode_id = 0;
        self.rotation_mode = RotationMode::Continuous;
    }

    pub fn tile(&self, id: TileId) -> Option<&TileSnapshot> {
        self.tiles.get(id as usize)
    }

    pub fn selected(&self) -> Option<TileId> {
        self.tiles.iter().find(|t| t.selected).map(|t| t.id)
    }

    pub fn complete(&self) -> bool {
        self.phase == SessionPhase::Complete
    }
}

impl Default for PuzzleSnapshot {
    fn default() -> Self {
        let mut s = Self {
            tiles: [TileSnapshot::default(); TILE_COUNT],
            attempts: 0,
            status: SessionStatus::InProgress,
            phase: SessionPhase::Playing,
            correct: 0,
            required: 0,
            episode_id: 0,
            rotation_mode: RotationMode::Continuous,
        };
        s.clear();
        s
    }
}
