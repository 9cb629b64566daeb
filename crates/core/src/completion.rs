//! Completion module - turns per-tile verdicts into a session status
//!
//! Two rules are available:
//!
//! - [`CompletionRule::Threshold`]: the reference heuristic. The puzzle counts
//!   as solved when at least `threshold` required tiles sit at their exact
//!   target angle. Two of the ten required tiles may still be misrouted, and a
//!   valid wiring that differs from the table is never accepted.
//! - [`CompletionRule::Connected`]: a real path check from source to sink
//!   through facing connectors (see [`crate::connectivity`]). The required
//!   tile table is not consulted.

use crate::connectivity::{path_exists, Endpoint, BATTERY, BULB};
use crate::grid::TileGrid;
use crate::oracle::{correct_count, RequiredTileTable};
use crate::tile::Tile;
use crate::types::{SessionStatus, COMPLETION_THRESHOLD};

/// How completion is decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompletionRule {
    Threshold { threshold: u8 },
    Connected { source: Endpoint, sink: Endpoint },
}

impl CompletionRule {
    pub fn threshold(threshold: u8) -> Self {
        CompletionRule::Threshold { threshold }
    }

    /// Path check from the battery to the bulb
    pub fn connected() -> Self {
        CompletionRule::Connected {
            source: BATTERY,
            sink: BULB,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompletionRule::Threshold { .. } => "threshold",
            CompletionRule::Connected { .. } => "connected",
        }
    }
}

impl Default for CompletionRule {
    fn default() -> Self {
        Self::threshold(COMPLETION_THRESHOLD)
    }
}

/// Threshold rule over an arbitrary tile set.
pub fn is_complete(tiles: &[Tile], table: &RequiredTileTable, threshold: u8) -> bool {
    correct_count(tiles, table) >= threshold as usize
}

/// Evaluate `rule` against the grid from scratch.
pub fn evaluate(grid: &TileGrid, table: &RequiredTileTable, rule: CompletionRule) -> SessionStatus {
    let done = match rule {
        CompletionRule::Threshold { threshold } => is_complete(grid.tiles(), table, threshold),
        CompletionRule::Connected { source, sink } => path_exists(grid, source, sink),
    };
    if done {
        SessionStatus::Complete
    } else {
        SessionStatus::InProgress
    }
}
