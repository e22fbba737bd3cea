//! Game configuration.
//!
//! # Environment Variables
//!
//! - `TETRECS_COLS`: Board width (default: 5)
//! - `TETRECS_ROWS`: Board height (default: 5)
//! - `TETRECS_MODE`: `classic` or `special` (default: classic)
//! - `TETRECS_SEED`: Piece RNG seed (default: 0)
//!
//! Unparsable values fall back to the default.

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::types::{GameMode, DEFAULT_COLS, DEFAULT_ROWS, MAX_BOARD_DIM};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub cols: u8,
    pub rows: u8,
    pub mode: GameMode,
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            mode: GameMode::Classic,
            seed: 0,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (environment, test map...)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let cols = lookup("TETRECS_COLS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.cols);
        let rows = lookup("TETRECS_ROWS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.rows);
        let mode = lookup("TETRECS_MODE")
            .and_then(|s| GameMode::from_str(&s))
            .unwrap_or(defaults.mode);
        let seed = lookup("TETRECS_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(defaults.seed);

        Self {
            cols,
            rows,
            mode,
            seed,
        }
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_size(mut self, cols: u8, rows: u8) -> Self {
        self.cols = cols;
        self.rows = rows;
        self
    }

    pub fn validate(&self) -> Result<()> {
        let ok = |n: u8| (1..=MAX_BOARD_DIM).contains(&n);
        if ok(self.cols) && ok(self.rows) {
            Ok(())
        } else {
            Err(GameError::InvalidBoardSize {
                cols: self.cols,
                rows: self.rows,
            })
        }
    }
}
