//! blockfall (workspace facade crate).
//!
//! The game itself lives in dedicated crates under `crates/`; this package
//! re-exports them as `blockfall::{core,input,term,types}` and adds the
//! process-level pieces: environment configuration and the JSON-lines event
//! log.

pub mod config;
pub mod event_log;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;
