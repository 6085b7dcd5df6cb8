//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains all the game rules and state management. It has
//! **no dependencies** on terminals, clocks, or I/O:
//!
//! - **Deterministic**: the same seed and the same event sequence produce the same game
//! - **Clock-free**: every entry point returns a [`Transition`] describing the
//!   one timer event (if any) the driver should deliver next
//! - **Zero-allocation**: fixed-size board, patterns and queues
//!
//! # Module Structure
//!
//! - [`piece`]: piece patterns, moves and transpose rotation
//! - [`supply`]: seeded anti-repetition piece randomizer
//! - [`board`]: 10x20 grid, placement checks and row collapse
//! - [`difficulty`]: level multiplier and advance interval
//! - [`scoring`]: point awards
//! - [`animation`]: line-clear flash
//! - [`schedule`]: timer events, transitions and a single-slot scheduler
//! - [`game_state`]: the state machine tying it all together
//! - [`snapshot`]: read-only view for renderers
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameState, Scheduler, TimerEvent, Transition};
//! use blockfall_core::types::GameAction;
//! use std::time::Duration;
//!
//! let mut game = GameState::new(12345);
//! let mut scheduler = Scheduler::new();
//! scheduler.arm(&game.start());
//!
//! // The first advance is due immediately and spawns a piece.
//! let due = scheduler.elapse(Duration::ZERO);
//! assert_eq!(due, Some(TimerEvent::Advance));
//! let next = game.on_timer(TimerEvent::Advance);
//! scheduler.arm(&next);
//! assert!(game.current().is_some());
//!
//! game.apply_action(GameAction::HardDrop);
//! assert!(game.score() > 0); // Hard drop awards points
//!
//! assert_eq!(
//!     game.apply_action(GameAction::Quit),
//!     Transition::End(blockfall_core::types::EndReason::Quit)
//! );
//! ```

pub mod animation;
pub mod board;
pub mod difficulty;
pub mod game_state;
pub mod piece;
pub mod schedule;
pub mod scoring;
pub mod snapshot;
pub mod supply;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use animation::{AnimationStep, LineAnimation};
pub use board::Board;
pub use difficulty::Difficulty;
pub use game_state::{GameEvent, GameState};
pub use piece::{Piece, PieceGrid};
pub use schedule::{Scheduler, TimerEvent, Transition};
pub use scoring::{calculate_points, ScoreEvent};
pub use snapshot::{GameSnapshot, NextSnapshot};
pub use supply::{Draw, SimpleRng, Supply};
