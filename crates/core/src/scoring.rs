//! Scoring module - point awards scaled by the level multiplier
//!
//! Three things score: completed rows (once the line-clear animation ends),
//! every gravity step a piece survives, and every cell a hard drop descends.
//! Each award is `floor(base * level)`, computed in integer tenths.

use crate::types::{FALL_POINTS, HARD_DROP_POINTS, LINE_SCORES};

/// Something that earns points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// Rows removed in one go (1..=4 scores, anything else is worth 0)
    LinesCleared(usize),
    /// One successful gravity step
    Fell,
    /// One cell descended during a hard drop
    HardDropCell,
}

/// Points before the level multiplier.
pub fn base_points(event: ScoreEvent) -> u32 {
    match event {
        ScoreEvent::LinesCleared(lines) => {
            if lines == 0 || lines > 4 {
                0
            } else {
                LINE_SCORES[lines]
            }
        }
        ScoreEvent::Fell => FALL_POINTS,
        ScoreEvent::HardDropCell => HARD_DROP_POINTS,
    }
}

/// Points awarded for `event` at a level multiplier given in tenths.
///
/// # Examples
///
/// ```
/// use blockfall_core::scoring::{calculate_points, ScoreEvent};
///
/// assert_eq!(calculate_points(ScoreEvent::LinesCleared(4), 10), 800);
/// assert_eq!(calculate_points(ScoreEvent::LinesCleared(4), 20), 1600);
/// assert_eq!(calculate_points(ScoreEvent::Fell, 15), 1);
/// ```
pub fn calculate_points(event: ScoreEvent, level_tenths: u32) -> u32 {
    let scaled = u64::from(base_points(event)) * u64::from(level_tenths) / 10;
    u32::try_from(scaled).unwrap_or(u32::MAX)
}
