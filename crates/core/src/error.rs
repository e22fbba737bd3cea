//! Engine error taxonomy.
//!
//! No variant is fatal to the process. Reaching game over is a normal end
//! state, not an error; only calls made *after* it are.

use crate::types::MAX_BOARD_DIM;

pub type Result<T> = std::result::Result<T, GameError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A target cell of the placement is off the board or already filled.
    #[error("piece cannot be placed at ({x}, {y})")]
    PlacementRejected { x: i8, y: i8 },

    #[error("coordinate ({x}, {y}) is outside the board")]
    OutOfBounds { x: i8, y: i8 },

    #[error("no piece regenerations left")]
    NoRegenerationsLeft,

    #[error("the game is over")]
    InvalidOperationAfterGameOver,

    #[error("the game has not been started")]
    NotStarted,

    #[error("unknown piece id {0}")]
    UnknownPiece(u8),

    #[error("board size {cols}x{rows} is not supported (1..={max} per side)", max = MAX_BOARD_DIM)]
    InvalidBoardSize { cols: u8, rows: u8 },
}

impl GameError {
    pub fn code(self) -> &'static str {
        match self {
            GameError::PlacementRejected { .. } => "placement_rejected",
            GameError::OutOfBounds { .. } => "out_of_bounds",
            GameError::NoRegenerationsLeft => "no_regenerations_left",
            GameError::InvalidOperationAfterGameOver => "game_over",
            GameError::NotStarted => "not_started",
            GameError::UnknownPiece(_) => "unknown_piece",
            GameError::InvalidBoardSize { .. } => "invalid_board_size",
        }
    }

    /// Whether the error is an expected in-game outcome that left state
    /// untouched, as opposed to a caller mistake.
    pub fn is_recoverable(self) -> bool {
        matches!(
            self,
            GameError::PlacementRejected { .. } | GameError::NoRegenerationsLeft
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(
            GameError::PlacementRejected { x: 1, y: 2 }.code(),
            "placement_rejected"
        );
        assert_eq!(GameError::InvalidOperationAfterGameOver.code(), "game_over");
        assert_eq!(GameError::UnknownPiece(20).code(), "unknown_piece");
    }

    #[test]
    fn only_in_game_rejections_are_recoverable() {
        assert!(GameError::PlacementRejected { x: 0, y: 0 }.is_recoverable());
        assert!(GameError::NoRegenerationsLeft.is_recoverable());
        assert!(!GameError::OutOfBounds { x: 9, y: 9 }.is_recoverable());
        assert!(!GameError::InvalidOperationAfterGameOver.is_recoverable());
    }

    #[test]
    fn messages_include_context() {
        let msg = GameError::InvalidBoardSize { cols: 0, rows: 5 }.to_string();
        assert_eq!(msg, "board size 0x5 is not supported (1..=64 per side)");
    }
}
