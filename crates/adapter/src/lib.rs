//! Adapter module - scripted control over line-delimited JSON
//!
//! This crate lets an external program (a test harness, a solver, an AI
//! agent) play the puzzle without a terminal. Requests arrive one JSON object
//! per line and every request gets exactly one reply line.
//!
//! # Message Types
//!
//! ## Client → Server
//!
//! - **observe**: Ask for the full puzzle state
//! - **rotate**: Turn one tile (`tile_id`) a quarter turn clockwise
//! - **reset**: Draw a new grid and start a new episode
//! - **hint**: Ask which tile to rotate next
//!
//! ## Server → Client
//!
//! - **observation**: Attempts, status, phase, correct count and every tile
//! - **ack**: Result of a rotate or reset, with the resulting status
//! - **hint**: Suggested tile and number of quarter turns, or null
//! - **error**: `invalid_json`, `unknown_type` or `invalid_command`
//!
//! # Example Protocol Flow
//!
//! ```text
//! Client -> Server: {"type":"observe","seq":1}
//! Server -> Client: {"type":"observation","seq":1,"request_seq":1,"attempts":0,...}
//! Client -> Server: {"type":"rotate","seq":2,"tile_id":5}
//! Server -> Client: {"type":"ack","seq":2,"request_seq":2,"action":"rotate","applied":true,...}
//! ```
//!
//! # Testing
//!
//! Pipe requests into the headless binary:
//!
//! ```bash
//! printf '{"type":"observe"}\n{"type":"hint"}\n' | tui-lightup --headless --seed 7
//! ```

pub mod protocol;
pub mod server;

pub use tui_lightup_core as core;
pub use tui_lightup_engine as engine;
pub use tui_lightup_types as types;

// Re-export protocol types for convenience
pub use protocol::*;
pub use server::LineServer;
