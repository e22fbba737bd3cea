//! Snapshot module - a read-only copy of the game for front ends
//!
//! Front ends redraw from a [`GameSnapshot`] after each notification instead
//! of reading engine internals.

use serde::{Deserialize, Serialize};

use crate::pieces::Piece;
use crate::types::{Cell, GameMode, EMPTY_CELL};

/// Point-in-time copy of everything a front end needs to draw the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub cols: u8,
    pub rows: u8,
    /// One vector per row, top to bottom
    pub board: Vec<Vec<Cell>>,
    pub current: Piece,
    pub upcoming: Piece,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub multiplier: u32,
    pub regenerations: u32,
    pub mode: GameMode,
    pub round: u64,
    pub delay_ms: u32,
    pub started: bool,
    pub game_over: bool,
}

impl GameSnapshot {
    pub fn filled_count(&self) -> usize {
        self.board
            .iter()
            .flatten()
            .filter(|&&c| c != EMPTY_CELL)
            .count()
    }

    /// Render the board as text, `.` for empty cells and the piece value
    /// (base 36) otherwise
    pub fn board_text(&self) -> String {
        let mut out = String::with_capacity(self.board.len() * (self.cols as usize + 1));
        for row in &self.board {
            for &cell in row {
                let ch = if cell == EMPTY_CELL {
                    '.'
                } else {
                    std::char::from_digit(cell as u32, 36).unwrap_or('#')
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}
