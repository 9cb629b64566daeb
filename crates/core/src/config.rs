use crate::completion::CompletionRule;
use crate::oracle::RequiredTileTable;
use crate::types::RotationMode;

/// Puzzle rules fixed for the lifetime of a session.
///
/// `Default` reproduces the reference puzzle: continuous start angles, the
/// ten-tile reference table and the 8-of-10 threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PuzzleConfig {
    pub rotation_mode: RotationMode,
    pub completion: CompletionRule,
    pub table: RequiredTileTable,
}

impl PuzzleConfig {
    pub fn with_rotation_mode(mut self, rotation_mode: RotationMode) -> Self {
        self.rotation_mode = rotation_mode;
        self
    }

    pub fn with_completion(mut self, completion: CompletionRule) -> Self {
        self.completion = completion;
        self
    }

    pub fn with_table(mut self, table: RequiredTileTable) -> Self {
        self.table = table;
        self
    }
}
