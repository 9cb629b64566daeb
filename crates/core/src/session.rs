//! Session module - one playable instance of the grid
//!
//! A session owns its grid, its random source and its counters. The only way
//! to change it is through [`PuzzleSession::rotate`], [`PuzzleSession::reset`]
//! or [`PuzzleSession::apply_action`]; every command finishes before it
//! returns, so a snapshot taken between commands is always consistent.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► Playing ──(first rotation that completes)──► Complete
//!            ▲                                            │
//!            └──────────────────── reset ◄────────────────┘
//! ```
//!
//! `status()` is recomputed from scratch after every rotation and always
//! reflects the grid. `phase()` latches `Complete` until the next reset, so a
//! completion banner does not flicker if the player keeps rotating.

use tracing::{debug, info};

use crate::completion::{evaluate, CompletionRule};
use crate::config::PuzzleConfig;
use crate::connectivity::{powered_tiles, Endpoint, BATTERY};
use crate::grid::{GridError, TileGrid};
use crate::oracle::{correct_count, verdict};
use crate::rng::{RandomSource, SimpleRng};
use crate::snapshot::{PuzzleSnapshot, TileSnapshot};
use crate::tile::Tile;
use crate::types::{PuzzleAction, SessionEvent, SessionPhase, SessionStatus, TileId, Verdict};

/// Complete puzzle state
#[derive(Debug, Clone)]
pub struct PuzzleSession<R = SimpleRng> {
    config: PuzzleConfig,
    rng: R,
    grid: TileGrid,
    /// Rotation actions applied since the last reset.
    attempts: u32,
    status: SessionStatus,
    phase: SessionPhase,
    /// Monotonic episode id (increments on reset).
    episode_id: u32,
    /// Pending completion event (consumed by the notifier).
    last_event: Option<SessionEvent>,
}

impl PuzzleSession<SimpleRng> {
    /// Create a reference puzzle with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::with_config(seed, PuzzleConfig::default())
    }

    pub fn with_config(seed: u32, config: PuzzleConfig) -> Self {
        Self::from_rng(config, SimpleRng::new(seed))
    }
}

impl<R: RandomSource> PuzzleSession<R> {
    /// Randomize a grid from `rng` and start playing.
    ///
    /// Like [`PuzzleSession::reset`], a fresh grid always starts
    /// `InProgress`.
    pub fn from_rng(config: PuzzleConfig, mut rng: R) -> Self {
        let grid = TileGrid::initialize(&mut rng, config.rotation_mode);
        debug!(
            rotation_mode = config.rotation_mode.as_str(),
            completion = config.completion.as_str(),
            "session created"
        );
        Self {
            config,
            rng,
            grid,
            attempts: 0,
            status: SessionStatus::InProgress,
            phase: SessionPhase::Playing,
            episode_id: 0,
            last_event: None,
        }
    }

    /// Start from a prepared grid; `rng` is used by later resets.
    ///
    /// The status is evaluated from the grid, the phase starts at `Playing`.
    pub fn from_grid(config: PuzzleConfig, rng: R, grid: TileGrid) -> Self {
        let status = evaluate(&grid, &config.table, config.completion);
        Self {
            config,
            rng,
            grid,
            attempts: 0,
            status,
            phase: SessionPhase::Playing,
            episode_id: 0,
            last_event: None,
        }
    }

    pub fn config(&self) -> &PuzzleConfig {
        &self.config
    }

    pub fn grid(&self) -> &TileGrid {
        &self.grid
    }

    pub fn tiles(&self) -> &[Tile] {
        self.grid.tiles()
    }

    pub fn get_tile(&self, id: TileId) -> Result<&Tile, GridError> {
        self.grid.get_tile(id)
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status.is_complete()
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn selected(&self) -> Option<TileId> {
        self.grid.selected()
    }

    /// Required tiles currently at their exact target angle
    pub fn correct_count(&self) -> usize {
        correct_count(self.grid.tiles(), &self.config.table)
    }

    pub fn verdict(&self, id: TileId) -> Result<Verdict, GridError> {
        self.grid
            .get_tile(id)
            .map(|tile| verdict(tile, &self.config.table))
    }

    /// Take the pending completion event, if any.
    pub fn take_last_event(&mut self) -> Option<SessionEvent> {
        self.last_event.take()
    }

    /// Turn tile `id` 90° clockwise and re-evaluate completion.
    ///
    /// An id that matches no tile is ignored: nothing changes and the attempt
    /// counter stays put. Returns the (possibly unchanged) status.
    pub fn rotate(&mut self, id: TileId) -> SessionStatus {
        let Some(tile) = self.grid.tile_mut(id) else {
            debug!(tile_id = id, "rotate ignored: no such tile");
            return self.status;
        };
        tile.rotate_cw();
        let rotation = tile.rotation;
        let wire = tile.wire;

        self.grid.select_only(id);
        self.attempts = self.attempts.saturating_add(1);
        self.status = evaluate(&self.grid, &self.config.table, self.config.completion);

        debug!(
            tile_id = id,
            wire = wire.as_str(),
            rotation,
            attempts = self.attempts,
            status = self.status.as_str(),
            "tile rotated"
        );

        if self.status.is_complete() && self.phase == SessionPhase::Playing {
            self.phase = SessionPhase::Complete;
            self.last_event = Some(SessionEvent::Completed {
                episode_id: self.episode_id,
                attempts: self.attempts,
            });
            info!(
                episode_id = self.episode_id,
                attempts = self.attempts,
                "circuit complete"
            );
        }

        self.status
    }

    /// Re-randomize every tile and start a new episode.
    ///
    /// Clears attempts, selection and any pending event; the status is
    /// `InProgress` whatever it was before.
    pub fn reset(&mut self) -> SessionStatus {
        self.grid = TileGrid::initialize(&mut self.rng, self.config.rotation_mode);
        self.attempts = 0;
        self.status = SessionStatus::InProgress;
        self.phase = SessionPhase::Playing;
        self.last_event = None;
        self.episode_id = self.episode_id.wrapping_add(1);
        debug!(episode_id = self.episode_id, "session reset");
        self.status
    }

    /// Apply a command; returns `true` if the session changed.
    pub fn apply_action(&mut self, action: PuzzleAction) -> bool {
        match action {
            PuzzleAction::Rotate(id) => {
                if self.grid.get_tile(id).is_err() {
                    return false;
                }
                self.rotate(id);
                true
            }
            PuzzleAction::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Where current enters the grid for flow display.
    fn flow_source(&self) -> Endpoint {
        match self.config.completion {
            CompletionRule::Connected { source, .. } => source,
            CompletionRule::Threshold { .. } => BATTERY,
        }
    }

    pub fn snapshot_into(&self, out: &mut PuzzleSnapshot) {
        let powered = powered_tiles(&self.grid, self.flow_source());
        let mut correct = 0u8;

        for (slot, tile) in out.tiles.iter_mut().zip(self.grid.iter()) {
            let v = verdict(tile, &self.config.table);
            if v.is_correct() {
                correct += 1;
            }
            *slot = TileSnapshot {
                id: tile.id,
                position: tile.position,
                wire: tile.wire,
                rotation: tile.rotation,
                selected: tile.selected,
                verdict: v,
                powered: powered.contains(tile.id),
            };
        }

        out.attempts = self.attempts;
        out.status = self.status;
        out.phase = self.phase;
        out.correct = correct;
        out.required = self.config.table.len() as u8;
        out.episode_id = self.episode_id;
        out.rotation_mode = self.config.rotation_mode;
    }

    pub fn snapshot(&self) -> PuzzleSnapshot {
        let mut s = PuzzleSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for PuzzleSession<SimpleRng> {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::RequiredTileTable;
    use crate::types::{RotationMode, WireType, COMPLETION_THRESHOLD, TILE_COUNT};

    /// Every tile skewed to 45° except the first `n` required tiles, which sit
    /// one quarter turn short of their target.
    fn primed_grid(n: usize) -> TileGrid {
        let table = RequiredTileTable::reference();
        let mut grid = TileGrid::uniform(WireType::Corner, 45.0);
        for (pos, angle) in table.iter().take(n) {
            let id = grid.id_at(pos).unwrap();
            grid.set_rotation(id, angle as f64 - 90.0).unwrap();
        }
        grid
    }

    fn primed_ids(n: usize) -> Vec<TileId> {
        RequiredTileTable::reference()
            .iter()
            .take(n)
            .map(|(pos, _)| pos.index() as TileId)
            .collect()
    }

    fn primed_session(n: usize) -> PuzzleSession {
        PuzzleSession::from_grid(PuzzleConfig::default(), SimpleRng::new(9), primed_grid(n))
    }

    #[test]
    fn test_new_session() {
        let session = PuzzleSession::new(12345);
        assert_eq!(session.tiles().len(), TILE_COUNT);
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.selected(), None);
        assert_eq!(session.episode_id(), 0);
    }

    #[test]
    fn test_rotate_updates_only_target_tile() {
        let mut session = PuzzleSession::new(12345);
        let before: Vec<Tile> = session.tiles().to_vec();

        session.rotate(6);

        for (old, new) in before.iter().zip(session.tiles()) {
            assert_eq!(old.position, new.position);
            assert_eq!(old.wire, new.wire);
            if new.id == 6 {
                let expected = (old.rotation + 90.0) % 360.0;
                assert_eq!(new.rotation, expected);
                assert!(new.selected);
            } else {
                assert_eq!(old.rotation, new.rotation);
                assert!(!new.selected);
            }
        }
        assert_eq!(session.attempts(), 1);
    }

    #[test]
    fn test_rotate_moves_selection() {
        let mut session = PuzzleSession::new(1);
        session.rotate(2);
        session.rotate(11);
        assert_eq!(session.selected(), Some(11));
        assert!(!session.get_tile(2).unwrap().selected);
    }

    #[test]
    fn test_rotate_unknown_id_is_noop() {
        let mut session = PuzzleSession::new(3);
        session.rotate(0);
        let before = session.tiles().to_vec();

        let status = session.rotate(TILE_COUNT as TileId);

        assert_eq!(status, SessionStatus::InProgress);
        assert_eq!(session.attempts(), 1);
        assert_eq!(session.tiles(), &before[..]);
        assert_eq!(session.selected(), Some(0));
    }

    #[test]
    fn test_four_rotations_cycle() {
        let mut session = PuzzleSession::new(77);
        let original = session.get_tile(9).unwrap().rotation;
        for _ in 0..4 {
            session.rotate(9);
        }
        assert_eq!(session.get_tile(9).unwrap().rotation, original);
        assert_eq!(session.attempts(), 4);
    }

    #[test]
    fn test_completion_at_threshold() {
        let mut session = primed_session(COMPLETION_THRESHOLD as usize);
        let ids = primed_ids(COMPLETION_THRESHOLD as usize);

        for (i, id) in ids.iter().enumerate() {
            let status = session.rotate(*id);
            if i + 1 < ids.len() {
                assert_eq!(status, SessionStatus::InProgress, "after {} rotations", i + 1);
            } else {
                assert_eq!(status, SessionStatus::Complete);
            }
        }
        assert_eq!(session.correct_count(), COMPLETION_THRESHOLD as usize);
        assert_eq!(session.phase(), SessionPhase::Complete);
    }

    #[test]
    fn test_seven_correct_is_not_enough() {
        let mut session = primed_session(7);
        for id in primed_ids(7) {
            session.rotate(id);
        }
        assert_eq!(session.correct_count(), 7);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.phase(), SessionPhase::Playing);
    }

    #[test]
    fn test_completion_event_fires_once() {
        let mut session = primed_session(10);
        let ids = primed_ids(10);
        for id in &ids[..8] {
            session.rotate(*id);
        }
        assert_eq!(
            session.take_last_event(),
            Some(SessionEvent::Completed {
                episode_id: 0,
                attempts: 8
            })
        );
        assert_eq!(session.take_last_event(), None);

        // Still complete, no second event.
        session.rotate(ids[8]);
        assert_eq!(session.status(), SessionStatus::Complete);
        assert_eq!(session.take_last_event(), None);
    }

    #[test]
    fn test_phase_latches_after_breaking_circuit() {
        let mut session = primed_session(8);
        let ids = primed_ids(8);
        for id in &ids {
            session.rotate(*id);
        }
        assert!(session.is_complete());

        // Rotating a correct tile away drops the live status but not the phase.
        session.rotate(ids[0]);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.phase(), SessionPhase::Complete);
        // Grid stays mutable.
        assert_eq!(session.attempts(), 9);
    }

    #[test]
    fn test_reset_on_complete_session() {
        let mut session = primed_session(8);
        for id in primed_ids(8) {
            session.rotate(id);
        }
        assert!(session.is_complete());

        let status = session.reset();

        assert_eq!(status, SessionStatus::InProgress);
        assert_eq!(session.status(), SessionStatus::InProgress);
        assert_eq!(session.phase(), SessionPhase::Playing);
        assert_eq!(session.attempts(), 0);
        assert_eq!(session.selected(), None);
        assert_eq!(session.episode_id(), 1);
        assert_eq!(session.take_last_event(), None);
        assert_eq!(session.tiles().len(), TILE_COUNT);
    }

    #[test]
    fn test_reset_draws_a_new_grid() {
        let mut session = PuzzleSession::new(5);
        let first = session.grid().clone();
        session.reset();
        assert_ne!(session.grid(), &first);
    }

    #[test]
    fn test_same_seed_same_sessions() {
        let mut a = PuzzleSession::new(2024);
        let mut b = PuzzleSession::new(2024);
        assert_eq!(a.grid(), b.grid());
        a.reset();
        b.reset();
        assert_eq!(a.grid(), b.grid());
    }

    #[test]
    fn test_apply_action() {
        let mut session = PuzzleSession::new(8);
        assert!(session.apply_action(PuzzleAction::Rotate(4)));
        assert_eq!(session.attempts(), 1);

        assert!(!session.apply_action(PuzzleAction::Rotate(99)));
        assert_eq!(session.attempts(), 1);

        assert!(session.apply_action(PuzzleAction::Reset));
        assert_eq!(session.attempts(), 0);
    }

    #[test]
    fn test_verdict_lookup() {
        let session = primed_session(0);
        assert_eq!(session.verdict(0), Ok(Verdict::NotApplicable));
        assert_eq!(session.verdict(1), Ok(Verdict::Incorrect));
        assert_eq!(session.verdict(16), Err(GridError::NotFound { id: 16 }));
    }

    #[test]
    fn test_quantized_session_starts_cardinal() {
        let config = PuzzleConfig::default().with_rotation_mode(RotationMode::Quantized);
        let mut session = PuzzleSession::with_config(4, config);
        for _ in 0..10 {
            assert!(session.tiles().iter().all(|t| t.quarter_turns().is_some()));
            session.reset();
        }
    }

    #[test]
    fn test_connected_rule_session() {
        let config = PuzzleConfig::default().with_completion(CompletionRule::connected());
        let mut grid = TileGrid::uniform(WireType::Straight, 0.0);
        grid.set_rotation(2, 270.0).unwrap();
        let mut session = PuzzleSession::from_grid(config, SimpleRng::new(1), grid);
        assert_eq!(session.status(), SessionStatus::InProgress);

        assert_eq!(session.rotate(2), SessionStatus::Complete);
        assert_eq!(session.phase(), SessionPhase::Complete);
    }

    #[test]
    fn test_snapshot_reflects_session() {
        let mut session = primed_session(8);
        let ids = primed_ids(8);
        for id in &ids {
            session.rotate(*id);
        }

        let snap = session.snapshot();
        assert_eq!(snap.attempts, 8);
        assert_eq!(snap.status, SessionStatus::Complete);
        assert!(snap.complete());
        assert_eq!(snap.correct, 8);
        assert_eq!(snap.required, 10);
        assert_eq!(snap.selected(), Some(ids[7]));
        for id in &ids {
            assert_eq!(snap.tile(*id).unwrap().verdict, Verdict::Correct);
        }
        assert_eq!(snap.tile(0).unwrap().verdict, Verdict::NotApplicable);
    }

    #[test]
    fn test_snapshot_into_overwrites_previous_frame() {
        let mut session = PuzzleSession::new(10);
        let mut snap = PuzzleSnapshot::default();
        session.rotate(1);
        session.snapshot_into(&mut snap);
        assert_eq!(snap.selected(), Some(1));

        session.reset();
        session.snapshot_into(&mut snap);
        assert_eq!(snap.selected(), None);
        assert_eq!(snap.attempts, 0);
        assert_eq!(snap.episode_id, 1);
    }

    #[test]
    fn test_snapshot_marks_powered_tiles() {
        let grid = TileGrid::uniform(WireType::Straight, 0.0);
        let session = PuzzleSession::from_grid(PuzzleConfig::default(), SimpleRng::new(1), grid);
        let snap = session.snapshot();
        assert!(snap.tiles[..4].iter().all(|t| t.powered));
        assert!(snap.tiles[4..].iter().all(|t| !t.powered));
    }
}
