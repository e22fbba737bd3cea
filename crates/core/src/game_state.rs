//! Game state module - the round state machine
//!
//! This module ties together the board, the piece source and scoring. It owns
//! every counter (score, level, lives, multiplier, regenerations) and decides
//! what happens at the end of each timed round.
//!
//! The state is fully deterministic and never touches a clock. Each time a
//! round is armed it queues a [`GameEvent::RoundArmed`] carrying a fresh round
//! id; whoever owns the real timer schedules it and reports back through
//! [`GameState::round_expired`], which ignores ids that are no longer current.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::board::Board;
use crate::config::GameConfig;
use crate::error::{GameError, Result};
use crate::events::GameEvent;
use crate::pieces::Piece;
use crate::rng::PieceSource;
use crate::scoring::{calculate_level, calculate_score, round_delay_ms};
use crate::snapshot::GameSnapshot;
use crate::types::*;

/// What a successful placement did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementOutcome {
    pub lines_cleared: u32,
    pub blocks_cleared: u32,
    pub score_delta: u32,
    pub cleared: BTreeSet<Coord>,
}

/// How a round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// A piece was placed (or this was the opening round); next round armed
    Continued,
    /// No placement in time: one life spent, pieces advanced, next round armed
    LifeLost,
    /// No placement in time with no lives left
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    mode: GameMode,
    source: PieceSource,
    current: Piece,
    upcoming: Piece,
    score: u32,
    level: u32,
    lives: u32,
    multiplier: u32,
    regenerations: u32,
    /// Id of the most recently armed round (0 before the first)
    round: u64,
    first_round: bool,
    placed_this_round: bool,
    started: bool,
    game_over: bool,
    /// Notifications not yet taken by the owner
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game on the default 5x5 board with a seeded random source
    pub fn new(seed: u32, mode: GameMode) -> Self {
        Self::build(Board::default(), mode, PieceSource::random(seed))
    }

    pub fn from_config(config: &GameConfig) -> Result<Self> {
        Self::with_source(config, PieceSource::random(config.seed))
    }

    /// Create a game that draws pieces from `source` instead of the seeded RNG
    pub fn with_source(config: &GameConfig, source: PieceSource) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.cols, config.rows)?;
        Ok(Self::build(board, config.mode, source))
    }

    fn build(board: Board, mode: GameMode, mut source: PieceSource) -> Self {
        let current = Piece::new(source.draw());
        let upcoming = Piece::new(source.draw());

        Self {
            board,
            mode,
            source,
            current,
            upcoming,
            score: 0,
            level: 0,
            lives: mode.starting_lives(),
            multiplier: 1,
            regenerations: mode.starting_regenerations(),
            round: 0,
            first_round: true,
            placed_this_round: false,
            started: false,
            game_over: false,
            events: Vec::new(),
        }
    }

    /// Start the game: announce the opening pieces and arm the first round.
    /// Calling it again while playing does nothing.
    pub fn start(&mut self) -> Result<()> {
        if self.game_over {
            return Err(GameError::InvalidOperationAfterGameOver);
        }
        if self.started {
            return Ok(());
        }
        self.started = true;
        info!(
            mode = self.mode.as_str(),
            cols = self.board.cols(),
            rows = self.board.rows(),
            lives = self.lives,
            "game started"
        );

        self.emit_pieces();
        self.evaluate_round()?;
        Ok(())
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    pub fn regenerations(&self) -> u32 {
        self.regenerations
    }

    pub fn current(&self) -> Piece {
        self.current
    }

    pub fn upcoming(&self) -> Piece {
        self.upcoming
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Id of the round currently running
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn is_first_round(&self) -> bool {
        self.first_round
    }

    pub fn placed_this_round(&self) -> bool {
        self.placed_this_round
    }

    /// Round length at the current level
    pub fn delay_ms(&self) -> u32 {
        round_delay_ms(self.level)
    }

    /// Take all queued notifications, oldest first
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            cols: self.board.cols(),
            rows: self.board.rows(),
            board: self.board.to_rows(),
            current: self.current,
            upcoming: self.upcoming,
            score: self.score,
            level: self.level,
            lives: self.lives,
            multiplier: self.multiplier,
            regenerations: self.regenerations,
            mode: self.mode,
            round: self.round,
            delay_ms: self.delay_ms(),
            started: self.started,
            game_over: self.game_over,
        }
    }

    fn ensure_playing(&self) -> Result<()> {
        if self.game_over {
            warn!("operation rejected: game is over");
            return Err(GameError::InvalidOperationAfterGameOver);
        }
        if !self.started {
            return Err(GameError::NotStarted);
        }
        Ok(())
    }

    fn emit_pieces(&mut self) {
        self.events.push(GameEvent::PieceChanged {
            current: self.current,
            upcoming: self.upcoming,
        });
    }

    /// Promote the upcoming piece and draw a new one behind it
    fn advance_piece(&mut self) {
        self.current = self.upcoming;
        self.upcoming = Piece::new(self.source.draw());
        debug!(
            current = self.current.kind.as_str(),
            upcoming = self.upcoming.kind.as_str(),
            "pieces advanced"
        );
    }

    /// Place the current piece centred on (x, y).
    ///
    /// On success the pieces advance, full lines are cleared and scored, and
    /// the next round is armed immediately. A rejected placement changes
    /// nothing and can be retried within the same round.
    pub fn attempt_placement(&mut self, x: i8, y: i8) -> Result<PlacementOutcome> {
        self.ensure_playing()?;

        if !self.board.can_place(&self.current, x, y) {
            self.placed_this_round = false;
            debug!(kind = self.current.kind.as_str(), x, y, "placement rejected");
            return Err(GameError::PlacementRejected { x, y });
        }

        self.board.place(&self.current, x, y)?;
        self.placed_this_round = true;
        self.advance_piece();
        let outcome = self.clear_and_score()?;
        self.evaluate_round()?;
        self.emit_pieces();
        Ok(outcome)
    }

    fn clear_and_score(&mut self) -> Result<PlacementOutcome> {
        let scan = self.board.scan_full_lines();
        self.board.clear_cells(&scan.cells)?;

        let lines_cleared = scan.line_count();
        let blocks_cleared = scan.block_count();
        let result = calculate_score(lines_cleared, blocks_cleared, self.multiplier, self.mode);

        self.multiplier = result.multiplier;
        self.score = self.score.saturating_add(result.delta);
        if result.bonus_life {
            self.lives += 1;
            info!(lives = self.lives, "bonus life awarded");
        }
        self.update_level();

        if lines_cleared > 0 {
            debug!(
                lines = lines_cleared,
                blocks = blocks_cleared,
                delta = result.delta,
                multiplier = self.multiplier,
                "lines cleared"
            );
            self.events.push(GameEvent::LinesCleared {
                cells: scan.cells.clone(),
            });
        }
        if result.delta > 0 {
            self.events.push(GameEvent::ScoreChanged { score: self.score });
        }

        Ok(PlacementOutcome {
            lines_cleared,
            blocks_cleared,
            score_delta: result.delta,
            cleared: scan.cells,
        })
    }

    fn update_level(&mut self) {
        let level = calculate_level(self.score);
        if level > self.level {
            info!(level, score = self.score, "level up");
            self.level = level;
        }
    }

    /// Close the current round and decide what happens next.
    ///
    /// Runs on round timeout and right after every successful placement.
    pub fn evaluate_round(&mut self) -> Result<RoundOutcome> {
        self.ensure_playing()?;

        if self.lives == 0 && !self.placed_this_round {
            self.game_over = true;
            info!(score = self.score, level = self.level, "game over");
            self.events.push(GameEvent::RoundArmed {
                round: self.round,
                delay_ms: self.delay_ms(),
                game_over: true,
            });
            self.events.push(GameEvent::GameOver {
                final_score: self.score,
            });
            return Ok(RoundOutcome::GameOver);
        }

        let outcome = if !self.placed_this_round && !self.first_round {
            self.lives -= 1;
            self.multiplier = 1;
            info!(lives = self.lives, "round expired without a placement");
            self.advance_piece();
            self.emit_pieces();
            RoundOutcome::LifeLost
        } else {
            self.first_round = false;
            RoundOutcome::Continued
        };

        self.arm_round();
        Ok(outcome)
    }

    fn arm_round(&mut self) {
        self.round += 1;
        let delay_ms = self.delay_ms();
        debug!(round = self.round, delay_ms, "round armed");
        self.events.push(GameEvent::RoundArmed {
            round: self.round,
            delay_ms,
            game_over: false,
        });
        self.placed_this_round = false;
    }

    /// Timer callback for round `round`.
    ///
    /// Returns `Ok(None)` when the round has already been superseded (a
    /// placement re-armed it, or the game ended); such a late timer must not
    /// cost a life.
    pub fn round_expired(&mut self, round: u64) -> Result<Option<RoundOutcome>> {
        if !self.started || self.game_over || round != self.round {
            debug!(expired = round, current = self.round, "stale round timer ignored");
            return Ok(None);
        }
        self.evaluate_round().map(Some)
    }

    /// Rotate the current piece by `steps` clockwise quarter turns
    pub fn rotate_current(&mut self, steps: i32) -> Result<Piece> {
        self.ensure_playing()?;
        self.current = self.current.rotate(steps);
        debug!(
            kind = self.current.kind.as_str(),
            rotation = self.current.rotation.as_str(),
            "current piece rotated"
        );
        self.emit_pieces();
        Ok(self.current)
    }

    /// Exchange current and upcoming pieces
    pub fn swap_pieces(&mut self) -> Result<()> {
        self.ensure_playing()?;
        std::mem::swap(&mut self.current, &mut self.upcoming);
        debug!(
            current = self.current.kind.as_str(),
            upcoming = self.upcoming.kind.as_str(),
            "pieces swapped"
        );
        self.emit_pieces();
        Ok(())
    }

    /// Discard the current piece for the upcoming one (special mode)
    pub fn regenerate(&mut self) -> Result<()> {
        self.ensure_playing()?;
        if self.regenerations == 0 {
            debug!("regeneration refused: none left");
            return Err(GameError::NoRegenerationsLeft);
        }
        self.advance_piece();
        self.emit_pieces();
        self.regenerations -= 1;
        debug!(remaining = self.regenerations, "pieces regenerated");
        Ok(())
    }

    /// Apply a player action
    pub fn apply_action(&mut self, action: GameAction) -> Result<()> {
        match action {
            GameAction::RotateCw => self.rotate_current(1).map(|_| ()),
            GameAction::RotateCcw => self.rotate_current(3).map(|_| ()),
            GameAction::Swap => self.swap_pieces(),
            GameAction::Regenerate => self.regenerate(),
            GameAction::Place { x, y } => self.attempt_placement(x, y).map(|_| ()),
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(0, GameMode::Classic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dot_game(mode: GameMode) -> GameState {
        let config = GameConfig::default().with_mode(mode);
        GameState::with_source(&config, PieceSource::fixed(PieceKind::Dot)).unwrap()
    }

    fn armed_rounds(events: &[GameEvent]) -> Vec<(u64, u32, bool)> {
        events
            .iter()
            .filter_map(|e| match e {
                GameEvent::RoundArmed {
                    round,
                    delay_ms,
                    game_over,
                } => Some((*round, *delay_ms, *game_over)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_new_game_state() {
        let state = GameState::new(12345, GameMode::Classic);

        assert!(!state.started);
        assert!(!state.game_over);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 0);
        assert_eq!(state.lives, 3);
        assert_eq!(state.multiplier, 1);
        assert_eq!(state.regenerations, 0);
        assert_eq!(state.round, 0);
        assert!(state.first_round);
        assert!(state.events.is_empty());
        assert_eq!(state.current.rotation, Rotation::North);
    }

    #[test]
    fn test_special_mode_counters() {
        let state = GameState::new(1, GameMode::Special);
        assert_eq!(state.lives, 1);
        assert_eq!(state.regenerations, 3);
    }

    #[test]
    fn test_same_seed_same_pieces() {
        let a = GameState::new(77, GameMode::Classic);
        let b = GameState::new(77, GameMode::Classic);
        assert_eq!(a.current, b.current);
        assert_eq!(a.upcoming, b.upcoming);
    }

    #[test]
    fn test_start_arms_first_round() {
        let mut state = dot_game(GameMode::Classic);
        state.start().unwrap();

        assert!(state.started);
        assert!(!state.first_round);
        assert_eq!(state.round, 1);
        assert_eq!(state.lives, 3);

        let events = state.take_events();
        assert!(matches!(events[0], GameEvent::PieceChanged { .. }));
        assert_eq!(armed_rounds(&events), vec![(1, 12_000, false)]);

        // Second start is a no-op
        state.start().unwrap();
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_operations_before_start_fail() {
        let mut state = dot_game(GameMode::Special);
        assert_eq!(state.attempt_placement(2, 2), Err(GameError::NotStarted));
        assert_eq!(state.swap_pieces(), Err(GameError::NotStarted));
        assert_eq!(state.regenerate(), Err(GameError::NotStarted));
        assert_eq!(state.evaluate_round(), Err(GameError::NotStarted));
        assert_eq!(state.round_expired(0), Ok(None));
    }

    #[test]
    fn test_placement_event_order() {
        let mut state = dot_game(GameMode::Classic);
        state.start().unwrap();
        state.take_events();

        for x in 0..4 {
            state.attempt_placement(x, 0).unwrap();
        }
        state.take_events();

        let outcome = state.attempt_placement(4, 0).unwrap();
        assert_eq!(outcome.lines_cleared, 1);
        assert_eq!(outcome.score_delta, 50);

        let events = state.take_events();
        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                GameEvent::PieceChanged { .. } => "piece",
                GameEvent::LinesCleared { .. } => "lines",
                GameEvent::ScoreChanged { .. } => "score",
                GameEvent::RoundArmed { .. } => "round",
                GameEvent::GameOver { .. } => "over",
            })
            .collect();
        assert_eq!(kinds, vec!["lines", "score", "round", "piece"]);
    }

    #[test]
    fn test_rejected_placement_keeps_round_running() {
        let mut state = dot_game(GameMode::Classic);
        state.start().unwrap();
        state.attempt_placement(2, 2).unwrap();
        let round = state.round;
        state.take_events();

        assert_eq!(
            state.attempt_placement(2, 2),
            Err(GameError::PlacementRejected { x: 2, y: 2 })
        );
        assert_eq!(state.round, round);
        assert!(!state.placed_this_round);
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_timeout_costs_life_and_resets_multiplier() {
        let mut state = dot_game(GameMode::Classic);
        state.start().unwrap();
        state.multiplier = 3;

        assert_eq!(state.evaluate_round(), Ok(RoundOutcome::LifeLost));
        assert_eq!(state.lives, 2);
        assert_eq!(state.multiplier, 1);
        assert_eq!(state.round, 2);
    }

    #[test]
    fn test_life_loss_advances_pieces() {
        let config = GameConfig::default();
        let source = PieceSource::cycle([PieceKind::Dot, PieceKind::Line, PieceKind::Plus]);
        let mut state = GameState::with_source(&config, source).unwrap();
        state.start().unwrap();
        assert_eq!(state.current.kind, PieceKind::Dot);
        assert_eq!(state.upcoming.kind, PieceKind::Line);

        state.evaluate_round().unwrap();
        assert_eq!(state.current.kind, PieceKind::Line);
        assert_eq!(state.upcoming.kind, PieceKind::Plus);
    }

    #[test]
    fn test_last_life_then_game_over() {
        let mut state = dot_game(GameMode::Special);
        state.start().unwrap();
        state.take_events();

        assert_eq!(state.evaluate_round(), Ok(RoundOutcome::LifeLost));
        assert_eq!(state.lives, 0);
        assert!(!state.game_over);

        assert_eq!(state.evaluate_round(), Ok(RoundOutcome::GameOver));
        assert!(state.game_over);

        let events = state.take_events();
        let rounds = armed_rounds(&events);
        assert_eq!(rounds.last(), Some(&(2, 12_000, true)));
        assert_eq!(events.last(), Some(&GameEvent::GameOver { final_score: 0 }));

        assert_eq!(
            state.attempt_placement(2, 2),
            Err(GameError::InvalidOperationAfterGameOver)
        );
        assert_eq!(
            state.evaluate_round(),
            Err(GameError::InvalidOperationAfterGameOver)
        );
        assert_eq!(state.start(), Err(GameError::InvalidOperationAfterGameOver));
    }

    #[test]
    fn test_placement_with_zero_lives_keeps_playing() {
        let mut state = dot_game(GameMode::Special);
        state.start().unwrap();
        state.evaluate_round().unwrap();
        assert_eq!(state.lives, 0);

        state.attempt_placement(0, 0).unwrap();
        assert!(!state.game_over);
        assert_eq!(state.lives, 0);
    }

    #[test]
    fn test_stale_round_ignored() {
        let mut state = dot_game(GameMode::Classic);
        state.start().unwrap();
        let first = state.round;

        state.attempt_placement(1, 1).unwrap();
        assert_eq!(state.round_expired(first), Ok(None));
        assert_eq!(state.lives, 3);

        let current = state.round;
        assert_eq!(state.round_expired(current), Ok(Some(RoundOutcome::LifeLost)));
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_bonus_life_at_multiplier_four() {
        let mut state = dot_game(GameMode::Special);
        state.start().unwrap();
        state.multiplier = 3;

        for x in 0..5 {
            state.attempt_placement(x, 4).unwrap();
        }
        // First four placements cleared nothing, resetting the multiplier
        assert_eq!(state.multiplier, 2);
        assert_eq!(state.lives, 1);

        state.multiplier = 3;
        for x in 0..5 {
            state.board.set(x, 3, 1).unwrap();
        }
        state.board.set(4, 3, 0).unwrap();
        state.attempt_placement(4, 3).unwrap();
        assert_eq!(state.multiplier, 4);
        assert_eq!(state.lives, 2);
    }

    #[test]
    fn test_regenerate_quota() {
        let mut state = dot_game(GameMode::Special);
        state.start().unwrap();

        for remaining in (0..3).rev() {
            state.regenerate().unwrap();
            assert_eq!(state.regenerations, remaining);
        }
        assert_eq!(state.regenerate(), Err(GameError::NoRegenerationsLeft));
    }

    #[test]
    fn test_classic_mode_has_no_regenerations() {
        let mut state = dot_game(GameMode::Classic);
        state.start().unwrap();
        assert_eq!(state.regenerate(), Err(GameError::NoRegenerationsLeft));
    }

    #[test]
    fn test_apply_action_dispatch() {
        let config = GameConfig::default();
        let source = PieceSource::cycle([PieceKind::T, PieceKind::Line]);
        let mut state = GameState::with_source(&config, source).unwrap();
        state.start().unwrap();

        state.apply_action(GameAction::RotateCw).unwrap();
        assert_eq!(state.current.rotation, Rotation::East);
        state.apply_action(GameAction::RotateCcw).unwrap();
        assert_eq!(state.current.rotation, Rotation::North);

        state.apply_action(GameAction::Swap).unwrap();
        assert_eq!(state.current.kind, PieceKind::Line);
        assert_eq!(state.upcoming.kind, PieceKind::T);

        state.apply_action(GameAction::Place { x: 2, y: 2 }).unwrap();
        assert_eq!(state.board.filled_count(), 3);
    }

    #[test]
    fn test_rotate_current_with_huge_step_counts() {
        let config = GameConfig::default();
        let mut state = GameState::with_source(&config, PieceSource::fixed(PieceKind::T)).unwrap();
        state.start().unwrap();

        state.rotate_current(1).unwrap();
        let piece = state.rotate_current(i32::MAX).unwrap();
        assert_eq!(piece.rotation, Rotation::North);

        let piece = state.rotate_current(i32::MIN).unwrap();
        assert_eq!(piece.rotation, Rotation::North);
    }

    #[test]
    fn test_level_follows_score() {
        let mut state = dot_game(GameMode::Classic);
        state.start().unwrap();
        state.score = 990;
        state.multiplier = 1;

        for x in 0..5 {
            state.attempt_placement(x, 0).unwrap();
        }
        assert_eq!(state.score, 1040);
        assert_eq!(state.level, 1);
        assert_eq!(state.delay_ms(), 11_500);
    }
}
