//! Supply module - anti-repetition piece randomizer
//!
//! Kinds are drawn uniformly, but a candidate that appears in the last four
//! produced kinds is re-drawn, up to six times. If every re-draw still hits
//! the history, the repeat is accepted so the draw always terminates.
//!
//! The history starts as `Z S Z S`, which keeps the two awkward kinds away
//! from the first few spawns.
//!
//! Randomness comes from a small seeded LCG so that a session can be replayed
//! from its seed.

use crate::types::{PieceKind, SUPPLY_HISTORY_LEN, SUPPLY_MAX_RETRIES};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Outcome of a single draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub kind: PieceKind,
    /// All retries hit the history and a recent kind was accepted.
    pub fallback: bool,
}

/// Piece supply with a four-entry history ring
#[derive(Debug, Clone)]
pub struct Supply {
    /// Oldest first, newest last.
    history: [PieceKind; SUPPLY_HISTORY_LEN],
    rng: SimpleRng,
    seed: u32,
    fallbacks: u32,
}

impl Supply {
    /// Create a new supply with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            history: [PieceKind::Z, PieceKind::S, PieceKind::Z, PieceKind::S],
            rng: SimpleRng::new(seed),
            seed,
            fallbacks: 0,
        }
    }

    /// Draw a kind among the first `max_kinds` kinds.
    ///
    /// Panics unless `1 <= max_kinds <= PieceKind::COUNT`.
    pub fn next_draw(&mut self, max_kinds: usize) -> Draw {
        assert!(
            (1..=PieceKind::COUNT).contains(&max_kinds),
            "max_kinds must be in 1..={}, got {}",
            PieceKind::COUNT,
            max_kinds
        );

        let mut kind = self.candidate(max_kinds);
        let mut retries = 0;
        while retries < SUPPLY_MAX_RETRIES && self.history.contains(&kind) {
            kind = self.candidate(max_kinds);
            retries += 1;
        }

        let fallback = self.history.contains(&kind);
        if fallback {
            self.fallbacks += 1;
        }

        self.history.rotate_left(1);
        self.history[SUPPLY_HISTORY_LEN - 1] = kind;

        Draw { kind, fallback }
    }

    /// Draw a kind among the first `max_kinds` kinds.
    pub fn next(&mut self, max_kinds: usize) -> PieceKind {
        self.next_draw(max_kinds).kind
    }

    /// Draw among all seven kinds.
    pub fn draw(&mut self) -> Draw {
        self.next_draw(PieceKind::COUNT)
    }

    fn candidate(&mut self, max_kinds: usize) -> PieceKind {
        let index = self.rng.next_range(max_kinds as u32) as usize;
        PieceKind::ALL[index]
    }

    /// Recent kinds, oldest first.
    pub fn history(&self) -> [PieceKind; SUPPLY_HISTORY_LEN] {
        self.history
    }

    /// Number of draws that had to accept a recent kind.
    pub fn fallbacks(&self) -> u32 {
        self.fallbacks
    }

    /// Seed the supply was created with.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for Supply {
    fn default() -> Self {
        Self::new(1)
    }
}
