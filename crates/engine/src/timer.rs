//! Round timers.
//!
//! A round timer is a single-shot, re-armable countdown. Arming replaces any
//! pending countdown in one step, so at most one round can be pending at a
//! time. When it fires, the owner reports the round id it was armed with back
//! to the game state.

use std::time::Duration;

use tracing::debug;

pub trait RoundTimer {
    /// Schedule expiry of `round` after `delay`, dropping any pending one
    fn arm(&mut self, round: u64, delay: Duration);

    /// Drop the pending expiry, if any
    fn cancel(&mut self);
}

/// Timer that never fires on its own; the caller fires it explicitly.
///
/// Used for headless play, replays and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualTimer {
    pub armed: Option<(u64, Duration)>,
    pub arm_count: u32,
    pub cancel_count: u32,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Round id of the pending expiry
    pub fn pending_round(&self) -> Option<u64> {
        self.armed.map(|(round, _)| round)
    }

    pub fn pending_delay(&self) -> Option<Duration> {
        self.armed.map(|(_, delay)| delay)
    }

    /// Consume the pending expiry, returning the round to report
    pub fn fire(&mut self) -> Option<u64> {
        self.armed.take().map(|(round, _)| round)
    }
}

impl RoundTimer for ManualTimer {
    fn arm(&mut self, round: u64, delay: Duration) {
        debug!(round, delay_ms = delay.as_millis() as u64, "manual timer armed");
        self.armed = Some((round, delay));
        self.arm_count += 1;
    }

    fn cancel(&mut self) {
        debug!("manual timer cancelled");
        self.armed = None;
        self.cancel_count += 1;
    }
}
