//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, terminal rendering, headless protocol).
//!
//! # Grid Dimensions
//!
//! The reference puzzle is a 4x4 grid of wire tiles:
//!
//! - **Rows**: 4 (indexed 0-3, top to bottom)
//! - **Columns**: 4 (indexed 0-3, left to right)
//! - **Tile ids**: row-major, `id = row * GRID_COLS + col`
//!
//! The battery sits west of tile (0, 0) and the bulb east of tile (0, 3).
//!
//! # Rotation
//!
//! Tile rotation is an angle in degrees, always kept in `[0, 360)`.
//! A rotation action turns a tile by one quarter turn (90°) clockwise.
//!
//! # Examples
//!
//! ```
//! use tui_lightup_types::{Direction, Position, WireType, GRID_COLS, GRID_ROWS};
//!
//! assert_eq!(WireType::Corner.as_str(), "corner");
//!
//! // Row-major indexing
//! let pos = Position::new(2, 1);
//! assert_eq!(pos.index(), 9);
//! assert_eq!(Position::from_index(9), Some(pos));
//!
//! // Neighbors stay inside the grid
//! assert_eq!(Position::new(0, 0).neighbor(Direction::North), None);
//! assert_eq!(Position::new(0, 0).neighbor(Direction::East), Some(Position::new(0, 1)));
//!
//! assert_eq!(GRID_ROWS, 4);
//! assert_eq!(GRID_COLS, 4);
//! ```

/// Grid height in tiles (4 rows)
pub const GRID_ROWS: u8 = 4;

/// Grid width in tiles (4 columns)
pub const GRID_COLS: u8 = 4;

/// Total number of tiles on the grid
pub const TILE_COUNT: usize = (GRID_ROWS as usize) * (GRID_COLS as usize);

/// Minimum number of correctly rotated required tiles for the reference puzzle (8 of 10)
pub const COMPLETION_THRESHOLD: u8 = 8;

/// One rotation action, in degrees
pub const QUARTER_TURN_DEG: f64 = 90.0;

/// A full turn, in degrees
pub const FULL_TURN_DEG: f64 = 360.0;

/// Number of entries in the reference required-tile table
pub const REQUIRED_TILE_COUNT: usize = 10;

/// Reference required-tile table: grid position and its single correct angle.
///
/// The remaining six positions never count toward completion.
pub const REFERENCE_TARGETS: [(Position, u16); REQUIRED_TILE_COUNT] = [
    (Position::new(0, 1), 0),
    (Position::new(0, 2), 0),
    (Position::new(0, 3), 90),
    (Position::new(1, 3), 0),
    (Position::new(2, 3), 180),
    (Position::new(2, 2), 0),
    (Position::new(2, 1), 0),
    (Position::new(2, 0), 90),
    (Position::new(1, 0), 0),
    (Position::new(1, 1), 0),
];

/// Stable tile identifier, assigned in row-major grid order.
pub type TileId = u8;


/// A grid coordinate
///
/// `row` grows downward and `col` grows to the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Check that the position lies on the grid
    pub fn in_bounds(&self) -> bool {
        self.row < GRID_ROWS && self.col < GRID_COLS
    }

    /// Row-major flat index (equal to the tile id at this position)
    pub fn index(&self) -> usize {
        (self.row as usize) * (GRID_COLS as usize) + (self.col as usize)
    }

    /// Inverse of [`Position::index`]; `None` past the last tile
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= TILE_COUNT {
            return None;
        }
        Some(Self {
            row: (index / GRID_COLS as usize) as u8,
            col: (index % GRID_COLS as usize) as u8,
        })
    }

    /// The adjacent position in `dir`, if it is on the grid
    pub fn neighbor(&self, dir: Direction) -> Option<Self> {
        let (row, col) = match dir {
            Direction::North => (self.row.checked_sub(1)?, self.col),
            Direction::East => (self.row, self.col.checked_add(1)?),
            Direction::South => (self.row.checked_add(1)?, self.col),
            Direction::West => (self.row, self.col.checked_sub(1)?),
        };
        let next = Self { row, col };
        next.in_bounds().then_some(next)
    }
}

/// Wire shape of a tile
///
/// - **Straight**: connectors on opposite sides (West–East at 0°)
/// - **Corner**: connectors on adjacent sides (West–North at 0°)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireType {
    Straight,
    Corner,
}

impl WireType {
    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            WireType::Straight => "straight",
            WireType::Corner => "corner",
        }
    }

    /// Open sides at 0° rotation
    pub fn base_connectors(&self) -> ConnectorMask {
        match self {
            WireType::Straight => ConnectorMask::EMPTY
                .with(Direction::West)
                .with(Direction::East),
            WireType::Corner => ConnectorMask::EMPTY
                .with(Direction::West)
                .with(Direction::North),
        }
    }
}

/// Tile sides, listed in clockwise order starting at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_lightup_types::Direction;
    ///
    /// assert_eq!(Direction::North.rotate_cw(), Direction::East);
    /// assert_eq!(Direction::West.rotate_cw(), Direction::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Direction::North => Direction::East,
            Direction::East => Direction::South,
            Direction::South => Direction::West,
            Direction::West => Direction::North,
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// Bit used for this side in a [`ConnectorMask`]
    pub fn bit(&self) -> u8 {
        match self {
            Direction::North => 0b0001,
            Direction::East => 0b0010,
            Direction::South => 0b0100,
            Direction::West => 0b1000,
        }
    }
}

/// Set of open tile sides, one bit per [`Direction`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ConnectorMask(u8);

impl ConnectorMask {
    pub const EMPTY: ConnectorMask = ConnectorMask(0);

    pub fn with(self, dir: Direction) -> Self {
        Self(self.0 | dir.bit())
    }

    pub fn contains(&self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Turn every open side one step clockwise (N→E→S→W→N).
    pub fn rotate_cw(self) -> Self {
        let r = self.0 << 1;
        Self((r & 0x0F) | (r >> 4))
    }
}

/// How tile rotations are drawn when a session is created or reset
///
/// - **Continuous**: uniform over `[0, 360)` degrees. A tile only becomes
///   correct if its start angle happens to be a multiple of 90.
/// - **Quantized**: uniform over `{0, 90, 180, 270}`, so every target angle is
///   reachable by quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RotationMode {
    #[default]
    Continuous,
    Quantized,
}

impl RotationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RotationMode::Continuous => "continuous",
            RotationMode::Quantized => "quantized",
        }
    }
}

/// Derived completion status of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionStatus {
    #[default]
    InProgress,
    Complete,
}

impl SessionStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, SessionStatus::Complete)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::InProgress => "in_progress",
            SessionStatus::Complete => "complete",
        }
    }
}

/// Display phase of a session
///
/// `Complete` is latched: once reached it stays until the session is reset,
/// even if later rotations break the circuit again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionPhase {
    #[default]
    Playing,
    Complete,
}

/// Correctness of a single tile against the required-tile table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// Position is not part of the required table
    NotApplicable,
}

impl Verdict {
    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

/// Commands accepted by a puzzle session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PuzzleAction {
    /// Turn one tile 90° clockwise
    Rotate(TileId),
    /// Re-randomize the grid and clear the attempt counter
    Reset,
}

/// One-shot event emitted by a session, consumed by a completion notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The circuit was completed for the first time in this episode.
    Completed { episode_id: u32, attempts: u32 },
}
