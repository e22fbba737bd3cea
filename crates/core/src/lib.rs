//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game: the board, the piece catalog,
//! scoring and the timed round state machine. It never reads a clock, spawns
//! a task or touches a terminal, so the same seed always produces the same
//! game.
//!
//! # Module Structure
//!
//! - [`board`]: Fixed-size grid with placement checks and full-line scanning
//! - [`pieces`]: The 15-shape catalog on a 3x3 grid and quarter-turn rotation
//! - [`rng`]: Seeded LCG and the piece sources built on it
//! - [`scoring`]: Clear points, multiplier law, levels and round length
//! - [`game_state`]: Lives, score, regenerations and the round state machine
//! - [`events`]: Notifications queued by the game state and the listener trait
//! - [`snapshot`]: Serializable point-in-time view for front ends
//! - [`config`]: Board size, mode and seed, loadable from the environment
//! - [`error`]: The crate-wide error type
//!
//! # Rounds
//!
//! Each round gives the player `max(2500, 12000 - 500 * level)` ms to place
//! the current piece. Placing a piece ends the round early and arms the next
//! one. A round that expires without a placement costs a life and resets the
//! multiplier; expiring with no lives left ends the game.
//!
//! The game state only announces rounds ([`GameEvent::RoundArmed`]); the
//! owner runs the clock and calls [`GameState::round_expired`] with the id it
//! was given.
//!
//! # Example
//!
//! ```
//! use tetrecs_core::GameState;
//! use tetrecs_types::GameMode;
//!
//! let mut game = GameState::new(12345, GameMode::Classic);
//! game.start().unwrap();
//!
//! // Every piece covers its own centre, so the middle of an empty board fits
//! game.attempt_placement(2, 2).unwrap();
//! assert!(game.board().filled_count() > 0);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod game_state;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tetrecs_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LineScan};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use events::{EventLog, GameEvent, GameListener};
pub use game_state::{GameState, PlacementOutcome, RoundOutcome};
pub use pieces::Piece;
pub use rng::{PieceSource, SimpleRng};
pub use scoring::{calculate_level, calculate_score, round_delay_ms, ScoreResult};
pub use snapshot::GameSnapshot;
