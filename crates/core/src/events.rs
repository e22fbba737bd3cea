//! Engine notifications.
//!
//! The game state queues [`GameEvent`]s as it changes; a shell drains them and
//! forwards each to a [`GameListener`]. Listeners only ever see shared
//! references and hold no handle to the engine, so they cannot call back into
//! it while a notification is being delivered.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::pieces::Piece;
use crate::types::Coord;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEvent {
    /// Current or upcoming piece changed (draw, rotation, swap, regeneration)
    PieceChanged { current: Piece, upcoming: Piece },
    /// Full lines were cleared; only emitted when at least one line cleared
    LinesCleared { cells: BTreeSet<Coord> },
    /// Score changed by a nonzero amount
    ScoreChanged { score: u32 },
    /// A round was armed, or the game reached its terminal state
    RoundArmed {
        round: u64,
        delay_ms: u32,
        game_over: bool,
    },
    /// Final score, for scoreboards
    GameOver { final_score: u32 },
}

impl GameEvent {
    pub fn dispatch(&self, listener: &mut dyn GameListener) {
        match self {
            GameEvent::PieceChanged { current, upcoming } => {
                listener.on_piece_changed(current, upcoming)
            }
            GameEvent::LinesCleared { cells } => listener.on_lines_cleared(cells),
            GameEvent::ScoreChanged { score } => listener.on_score_changed(*score),
            GameEvent::RoundArmed {
                delay_ms,
                game_over,
                ..
            } => listener.on_round_armed(*delay_ms, *game_over),
            GameEvent::GameOver { final_score } => listener.on_game_over(*final_score),
        }
    }
}

/// Receiver for engine notifications (UI, audio, scoreboard...)
///
/// Every method defaults to doing nothing so implementors pick only what they
/// need.
pub trait GameListener {
    fn on_piece_changed(&mut self, _current: &Piece, _upcoming: &Piece) {}

    fn on_lines_cleared(&mut self, _cells: &BTreeSet<Coord>) {}

    fn on_score_changed(&mut self, _score: u32) {}

    fn on_round_armed(&mut self, _delay_ms: u32, _game_over: bool) {}

    fn on_game_over(&mut self, _final_score: u32) {}
}

impl GameListener for () {}

/// Listener that keeps every event it receives
#[derive(Debug, Default, Clone)]
pub struct EventLog {
    pub events: Vec<GameEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GameListener for EventLog {
    fn on_piece_changed(&mut self, current: &Piece, upcoming: &Piece) {
        self.events.push(GameEvent::PieceChanged {
            current: *current,
            upcoming: *upcoming,
        });
    }

    fn on_lines_cleared(&mut self, cells: &BTreeSet<Coord>) {
        self.events.push(GameEvent::LinesCleared {
            cells: cells.clone(),
        });
    }

    fn on_score_changed(&mut self, score: u32) {
        self.events.push(GameEvent::ScoreChanged { score });
    }

    fn on_round_armed(&mut self, delay_ms: u32, game_over: bool) {
        // Listeners are not told the round id
        self.events.push(GameEvent::RoundArmed {
            round: 0,
            delay_ms,
            game_over,
        });
    }

    fn on_game_over(&mut self, final_score: u32) {
        self.events.push(GameEvent::GameOver { final_score });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[derive(Default)]
    struct ScoreOnly {
        scores: Vec<u32>,
    }

    impl GameListener for ScoreOnly {
        fn on_score_changed(&mut self, score: u32) {
            self.scores.push(score);
        }
    }

    #[test]
    fn dispatch_routes_to_matching_method() {
        let mut listener = ScoreOnly::default();
        let events = [
            GameEvent::ScoreChanged { score: 50 },
            GameEvent::PieceChanged {
                current: Piece::new(PieceKind::Dot),
                upcoming: Piece::new(PieceKind::Line),
            },
            GameEvent::ScoreChanged { score: 150 },
        ];
        for event in &events {
            event.dispatch(&mut listener);
        }
        assert_eq!(listener.scores, vec![50, 150]);
    }

    #[test]
    fn event_log_records_in_order() {
        let mut log = EventLog::new();
        GameEvent::RoundArmed {
            round: 7,
            delay_ms: 12_000,
            game_over: false,
        }
        .dispatch(&mut log);
        GameEvent::GameOver { final_score: 90 }.dispatch(&mut log);

        assert_eq!(
            log.events,
            vec![
                GameEvent::RoundArmed {
                    round: 0,
                    delay_ms: 12_000,
                    game_over: false
                },
                GameEvent::GameOver { final_score: 90 },
            ]
        );
    }

    #[test]
    fn events_serialize_with_type_tag() {
        let json = serde_json::to_string(&GameEvent::ScoreChanged { score: 10 }).unwrap();
        assert_eq!(json, r#"{"type":"score_changed","score":10}"#);
    }
}
