//! Core puzzle logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the circuit puzzle. It has **no
//! dependencies** on terminals, sockets or files, making it:
//!
//! - **Deterministic**: the same seed produces the same grids, reset after reset
//! - **Testable**: every rule is covered by unit and property tests
//! - **Portable**: the same session drives the terminal UI and the headless adapter
//!
//! # Module Structure
//!
//! - [`tile`]: a single wire segment, its angle and its open sides
//! - [`grid`]: the 4x4 tile grid and its random initializer
//! - [`oracle`]: the required tile table and per-tile verdicts
//! - [`completion`]: threshold and path rules that decide when the puzzle is solved
//! - [`connectivity`]: breadth-first current tracing from battery to bulb
//! - [`session`]: the rotate/reset lifecycle and attempt counting
//! - [`snapshot`]: a copyable read-only view for renderers and observers
//! - [`rng`]: seeded LCG behind a [`RandomSource`] trait
//!
//! # Puzzle Rules
//!
//! - Every tile starts at a random angle with a random wire type
//! - A rotation turns one tile 90° clockwise and counts as one attempt
//! - Ten positions have a target angle; a tile is correct only at that exact angle
//! - Eight correct tiles complete the circuit; the other six positions never count
//! - Reset draws a fresh grid and clears the attempt counter
//!
//! # Example
//!
//! ```
//! use tui_lightup_core::PuzzleSession;
//! use tui_lightup_types::SessionStatus;
//!
//! let mut session = PuzzleSession::new(12345);
//! session.rotate(5);
//! assert_eq!(session.attempts(), 1);
//! assert_eq!(session.selected(), Some(5));
//!
//! session.reset();
//! assert_eq!(session.attempts(), 0);
//! assert_eq!(session.status(), SessionStatus::InProgress);
//! ```

pub mod completion;
pub mod config;
pub mod connectivity;
pub mod grid;
pub mod oracle;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod tile;

pub use tui_lightup_types as types;

// Re-export commonly used types for convenience
pub use completion::{evaluate, is_complete, CompletionRule};
pub use config::PuzzleConfig;
pub use connectivity::{path_exists, powered_tiles, Endpoint, PoweredSet, BATTERY, BULB};
pub use grid::{GridError, TileGrid};
pub use oracle::{correct_count, verdict, RequiredTileTable};
pub use rng::{RandomSource, SimpleRng};
pub use session::PuzzleSession;
pub use snapshot::{PuzzleSnapshot, TileSnapshot};
pub use tile::{normalize_degrees, quarter_turns, Tile};
