//! Solving aids built on top of the puzzle core.
//!
//! Nothing here mutates a session; callers decide whether to follow a hint.

pub mod hint;

pub use hint::{next_hint, plan, quarter_turns, PlanStep};
