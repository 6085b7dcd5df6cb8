//! Runtime configuration from environment variables.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | supply seed (u32) | derived from the clock |
//! | `BLOCKFALL_LOG_PATH` | JSON-lines event log file | disabled |
//! | `BLOCKFALL_CELL_WIDTH` | terminal columns per board cell (1..=4) | 2 |
//!
//! Unparsable values fall back to the default.

use std::env;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DEFAULT_CELL_WIDTH: u16 = 2;
pub const MAX_CELL_WIDTH: u16 = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub seed: u32,
    pub log_path: Option<PathBuf>,
    pub cell_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: clock_seed(),
            log_path: None,
            cell_width: DEFAULT_CELL_WIDTH,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (the environment, or a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let seed = lookup("BLOCKFALL_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let log_path = lookup("BLOCKFALL_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let cell_width = lookup("BLOCKFALL_CELL_WIDTH")
            .and_then(|s| s.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_CELL_WIDTH)
            .clamp(1, MAX_CELL_WIDTH);

        Self {
            seed,
            log_path,
            cell_width,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ (d.as_secs() as u32))
        .unwrap_or(1)
}
