//! Synchronous engine driver.
//!
//! [`Engine`] wraps a [`GameState`] with a [`RoundTimer`] and a
//! [`GameListener`]. After every operation it drains the queued events,
//! keeps the timer in step with the armed round and forwards each event to
//! the listener.

use std::time::Duration;

use tetrecs_core::{
    GameConfig, GameEvent, GameListener, GameSnapshot, GameState, Piece, PieceSource,
    PlacementOutcome, Result, RoundOutcome,
};
use tetrecs_types::GameAction;
use tracing::debug;

use crate::timer::RoundTimer;

pub struct Engine<T, L> {
    state: GameState,
    timer: T,
    listener: L,
}

impl<T: RoundTimer, L: GameListener> Engine<T, L> {
    pub fn new(state: GameState, timer: T, listener: L) -> Self {
        Self {
            state,
            timer,
            listener,
        }
    }

    pub fn from_config(config: &GameConfig, timer: T, listener: L) -> Result<Self> {
        Ok(Self::new(GameState::from_config(config)?, timer, listener))
    }

    pub fn with_source(
        config: &GameConfig,
        source: PieceSource,
        timer: T,
        listener: L,
    ) -> Result<Self> {
        Ok(Self::new(
            GameState::with_source(config, source)?,
            timer,
            listener,
        ))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn listener(&self) -> &L {
        &self.listener
    }

    pub fn listener_mut(&mut self) -> &mut L {
        &mut self.listener
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.state.snapshot()
    }

    /// Start the game and arm the first round
    pub fn start(&mut self) -> Result<()> {
        let result = self.state.start();
        self.flush();
        result
    }

    pub fn place(&mut self, x: i8, y: i8) -> Result<PlacementOutcome> {
        let result = self.state.attempt_placement(x, y);
        self.flush();
        result
    }

    pub fn rotate(&mut self, steps: i32) -> Result<Piece> {
        let result = self.state.rotate_current(steps);
        self.flush();
        result
    }

    pub fn swap(&mut self) -> Result<()> {
        let result = self.state.swap_pieces();
        self.flush();
        result
    }

    pub fn regenerate(&mut self) -> Result<()> {
        let result = self.state.regenerate();
        self.flush();
        result
    }

    pub fn apply_action(&mut self, action: GameAction) -> Result<()> {
        let result = self.state.apply_action(action);
        self.flush();
        result
    }

    /// Report that the timer armed for `round` went off
    pub fn timer_fired(&mut self, round: u64) -> Result<Option<RoundOutcome>> {
        let result = self.state.round_expired(round);
        self.flush();
        result
    }

    /// Deliver queued events: timer first, then the listener
    fn flush(&mut self) {
        for event in self.state.take_events() {
            if let GameEvent::RoundArmed {
                round,
                delay_ms,
                game_over,
            } = event
            {
                if game_over {
                    self.timer.cancel();
                } else {
                    self.timer
                        .arm(round, Duration::from_millis(u64::from(delay_ms)));
                }
            }
            debug!(?event, "dispatching event");
            event.dispatch(&mut self.listener);
        }
    }
}
