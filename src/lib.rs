//! TUI Light-Up (workspace facade crate).
//!
//! Re-exports the workspace crates as `tui_lightup::{core,adapter,term,input,engine,types}`
//! so integration tests and the binary depend on one path while the
//! implementation lives in dedicated crates under `crates/`.

pub use tui_lightup_adapter as adapter;
pub use tui_lightup_core as core;
pub use tui_lightup_engine as engine;
pub use tui_lightup_input as input;
pub use tui_lightup_term as term;
pub use tui_lightup_types as types;
