//! Terminal input module (session-facing).
//!
//! Maps `crossterm` key events into [`InputAction`]s and tracks the grid
//! cursor the keyboard player steers. Resolving a mouse click into a tile is
//! the renderer's job, since only it knows the layout.

pub mod cursor;
pub mod map;

pub use tui_lightup_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit, InputAction};
