//! Terminal front end.
//!
//! A small, game-oriented rendering layer: the [`GameView`] paints a
//! [`GameSnapshot`](crate::core::GameSnapshot) into a [`FrameBuffer`], and the
//! [`TerminalRenderer`] writes changed rows to the terminal through
//! `crossterm`. Only the renderer performs I/O.

pub mod fb;
pub mod game_view;
pub mod palette;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_changed_rows, encode_full, TerminalRenderer};
