//! Terminal input module.
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. The game
//! core never sees physical keys; this crate is the only place that does.

pub mod map;

pub use blockfall_types as types;

pub use map::{map_key, KEY_HELP};
