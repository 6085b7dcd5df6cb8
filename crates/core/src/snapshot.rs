//! Read-only view of a game for renderers
//!
//! The falling piece is part of the board grid, so the board copy already
//! shows it. Colours are stored as `Color::as_u8` codes (0 = empty).

use crate::piece::PieceGrid;
use crate::types::{Color, EndReason, PieceKind, BOARD_HEIGHT, BOARD_WIDTH, INITIAL_LEVEL_TENTHS};

/// The upcoming piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NextSnapshot {
    pub kind: PieceKind,
    pub grid: PieceGrid,
    pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub next: Option<NextSnapshot>,
    pub score: u32,
    /// Level multiplier times ten (1.0 -> 10).
    pub level_tenths: u32,
    pub paused: bool,
    pub animating: bool,
    pub ended: Option<EndReason>,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.ended.is_none() && !self.paused
    }

    /// Colour at (x, y), `None` when empty or out of range.
    pub fn color_at(&self, x: usize, y: usize) -> Option<Color> {
        self.board
            .get(y)
            .and_then(|row| row.get(x))
            .and_then(|&v| Color::from_u8(v))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            next: None,
            score: 0,
            level_tenths: INITIAL_LEVEL_TENTHS,
            paused: false,
            animating: false,
            ended: None,
        }
    }
}
