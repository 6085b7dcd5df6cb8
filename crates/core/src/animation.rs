//! Line-clear animation
//!
//! Completed rows flash by swapping their content with a stored snapshot:
//! the first swap shows a highlight row, the next swap restores the original
//! cells, and so on. The step count is always even, so when the animation
//! finishes the board holds the original (full) rows again and the caller
//! collapses them.

use arrayvec::ArrayVec;

use crate::board::{Board, Row};
use crate::types::{Color, BOARD_WIDTH};

/// Colour used for the highlight rows.
pub const HIGHLIGHT: Color = Color::Beige;

/// Result of one animation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationStep {
    /// Rows were swapped; another step is due.
    Continue,
    /// No steps left; the rows can be collapsed.
    Finished,
}

/// Flash state for up to four completed rows
#[derive(Debug, Clone, PartialEq)]
pub struct LineAnimation {
    /// `(row, stored content)`, bottom row first.
    rows: ArrayVec<(usize, Row), 4>,
    remaining_steps: u8,
}

impl LineAnimation {
    /// Prepare an animation for `rows` (descending order, at most four).
    pub fn new(rows: &[usize]) -> Self {
        assert!(
            !rows.is_empty() && rows.len() <= 4,
            "line animation needs 1..=4 rows, got {}",
            rows.len()
        );
        let highlight = [Some(HIGHLIGHT); BOARD_WIDTH as usize];
        Self {
            rows: rows.iter().map(|&y| (y, highlight)).collect(),
            remaining_steps: Self::steps_for(rows.len()),
        }
    }

    /// Number of swaps for a clear of `count` rows.
    pub fn steps_for(count: usize) -> u8 {
        match count {
            0..=2 => 2,
            3 => 4,
            _ => 6,
        }
    }

    /// Apply one step to the board.
    pub fn step(&mut self, board: &mut Board) -> AnimationStep {
        if self.remaining_steps == 0 {
            return AnimationStep::Finished;
        }
        self.remaining_steps -= 1;
        for (y, stored) in self.rows.iter_mut() {
            *stored = board.replace_row(*y, *stored);
        }
        AnimationStep::Continue
    }

    /// Animated rows, bottom row first.
    pub fn rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows.iter().map(|(y, _)| *y)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn remaining_steps(&self) -> u8 {
        self.remaining_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_board_row(board: &mut Board, y: i8) {
        for x in 0..BOARD_WIDTH as i8 {
            board.set(x, y, Some(Color::Green));
        }
    }

    #[test]
    fn test_steps_per_row_count() {
        assert_eq!(LineAnimation::steps_for(1), 2);
        assert_eq!(LineAnimation::steps_for(2), 2);
        assert_eq!(LineAnimation::steps_for(3), 4);
        assert_eq!(LineAnimation::steps_for(4), 6);
    }

    #[test]
    fn test_flash_then_restore() {
        let mut board = Board::new();
        full_board_row(&mut board, 19);
        let original = board.clone();

        let mut anim = LineAnimation::new(&[19]);
        assert_eq!(anim.remaining_steps(), 2);

        assert_eq!(anim.step(&mut board), AnimationStep::Continue);
        assert!(board.row(19).iter().all(|c| *c == Some(HIGHLIGHT)));

        assert_eq!(anim.step(&mut board), AnimationStep::Continue);
        assert_eq!(board, original);

        assert_eq!(anim.step(&mut board), AnimationStep::Finished);
        assert_eq!(board, original);
    }

    #[test]
    fn test_four_rows_take_six_steps() {
        let mut board = Board::new();
        for y in 16..20 {
            full_board_row(&mut board, y);
        }
        let mut anim = LineAnimation::new(&[19, 18, 17, 16]);
        assert_eq!(anim.rows().collect::<Vec<_>>(), vec![19, 18, 17, 16]);

        let mut continues = 0;
        while anim.step(&mut board) == AnimationStep::Continue {
            continues += 1;
        }
        assert_eq!(continues, 6);
        for y in 16..20 {
            assert!(board.row_is_complete(y));
            assert_eq!(board.get(0, y as i8), Some(Some(Color::Green)));
        }
    }

    #[test]
    #[should_panic(expected = "1..=4 rows")]
    fn test_empty_rows_panics() {
        LineAnimation::new(&[]);
    }
}
