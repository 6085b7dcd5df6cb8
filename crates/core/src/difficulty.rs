//! Difficulty module - level multiplier and advance interval
//!
//! Every `LEVEL_UP_COUNTDOWN` locked pieces the level multiplier grows by
//! `LEVEL_STEP_TENTHS` and the advance interval shrinks to
//! `INITIAL_TICK_MS / level`. The same multiplier scales every score award.
//!
//! The level is kept in tenths so that `1.0 + 13 * 0.1` is exactly `2.3`.

use std::time::Duration;

use crate::types::{INITIAL_LEVEL_TENTHS, INITIAL_TICK_MS, LEVEL_STEP_TENTHS, LEVEL_UP_COUNTDOWN};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Difficulty {
    countdown: u32,
    level_tenths: u32,
    tick_interval: Duration,
}

impl Difficulty {
    pub fn new() -> Self {
        Self::with_level_tenths(INITIAL_LEVEL_TENTHS)
    }

    /// Start at an arbitrary multiplier (in tenths) with a full countdown.
    pub fn with_level_tenths(level_tenths: u32) -> Self {
        assert!(level_tenths > 0, "difficulty level must be positive");
        Self {
            countdown: LEVEL_UP_COUNTDOWN,
            level_tenths,
            tick_interval: Self::interval_for(level_tenths),
        }
    }

    /// `INITIAL_TICK_MS / (tenths / 10)`, rounded to the nanosecond.
    fn interval_for(level_tenths: u32) -> Duration {
        let scaled = INITIAL_TICK_MS * 1_000_000 * 10;
        let tenths = u64::from(level_tenths);
        Duration::from_nanos((scaled + tenths / 2) / tenths)
    }

    /// Record one locked piece. Returns `true` when the level went up.
    pub fn on_piece_locked(&mut self) -> bool {
        if self.countdown <= 1 {
            self.countdown = LEVEL_UP_COUNTDOWN;
            self.level_tenths = self.level_tenths.saturating_add(LEVEL_STEP_TENTHS);
            self.tick_interval = Self::interval_for(self.level_tenths);
            true
        } else {
            self.countdown -= 1;
            false
        }
    }

    /// Locks left before the next level-up.
    pub fn countdown(&self) -> u32 {
        self.countdown
    }

    /// Level multiplier (1.0 at the start).
    pub fn level(&self) -> f32 {
        self.level_tenths as f32 / 10.0
    }

    /// Level multiplier times ten (1.3 -> 13).
    pub fn level_tenths(&self) -> u32 {
        self.level_tenths
    }

    /// Delay between two advances.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_difficulty() {
        let d = Difficulty::new();
        assert_eq!(d.countdown(), 10);
        assert_eq!(d.level(), 1.0);
        assert_eq!(d.tick_interval(), Duration::from_millis(300));
        assert_eq!(d.level_tenths(), 10);
    }

    #[test]
    fn test_countdown_decrements() {
        let mut d = Difficulty::new();
        assert!(!d.on_piece_locked());
        assert_eq!(d.countdown(), 9);
        assert_eq!(d.level(), 1.0);
    }

    #[test]
    fn test_level_up_after_countdown() {
        let mut d = Difficulty::new();
        let ups = (0..LEVEL_UP_COUNTDOWN)
            .filter(|_| d.on_piece_locked())
            .count();

        assert_eq!(ups, 1);
        assert_eq!(d.countdown(), LEVEL_UP_COUNTDOWN);
        assert_eq!(d.level_tenths(), 11);
        assert!((d.level() - 1.1).abs() < 1e-6);

        // 300ms / 1.1 = 272.727272...ms
        assert_eq!(d.tick_interval(), Duration::from_nanos(272_727_273));
    }

    #[test]
    fn test_level_does_not_drift() {
        let mut d = Difficulty::new();
        for _ in 0..13 * LEVEL_UP_COUNTDOWN {
            d.on_piece_locked();
        }
        assert_eq!(d.level_tenths(), 23);
        // 300ms / 2.3 = 130.434782...ms
        assert_eq!(d.tick_interval(), Duration::from_nanos(130_434_783));

        for _ in 0..7 * LEVEL_UP_COUNTDOWN {
            d.on_piece_locked();
        }
        assert_eq!(d.level_tenths(), 30);
        assert_eq!(d.tick_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_interval_keeps_shrinking() {
        let mut d = Difficulty::new();
        let mut last = d.tick_interval();
        for _ in 0..5 {
            for _ in 0..LEVEL_UP_COUNTDOWN {
                d.on_piece_locked();
            }
            assert!(d.tick_interval() < last);
            last = d.tick_interval();
        }
        assert_eq!(d.level_tenths(), 15);
        assert_eq!(d.tick_interval(), Duration::from_millis(200));
    }

    #[test]
    fn test_with_level_tenths() {
        let d = Difficulty::with_level_tenths(20);
        assert_eq!(d.tick_interval(), Duration::from_millis(150));
        assert_eq!(d.countdown(), LEVEL_UP_COUNTDOWN);
        assert_eq!(d.level(), 2.0);
    }
}
