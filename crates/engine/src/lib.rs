//! Timing shell around the deterministic core.
//!
//! - [`timer`]: the re-armable round timer seam and a manual implementation
//! - [`driver`]: [`Engine`], which keeps a timer and a listener in step with
//!   the game state's events
//! - [`runtime`]: a tokio worker that owns an engine and real round timers
//!
//! ```
//! use tetrecs_core::{EventLog, GameConfig};
//! use tetrecs_engine::{Engine, ManualTimer};
//!
//! let mut engine = Engine::from_config(&GameConfig::default(), ManualTimer::new(), EventLog::new())
//!     .unwrap();
//! engine.start().unwrap();
//!
//! // Let the first round run out
//! let round = engine.timer().pending_round().unwrap();
//! engine.timer_fired(round).unwrap();
//! assert_eq!(engine.state().lives(), 2);
//! ```

pub mod driver;
pub mod runtime;
pub mod timer;

pub use driver::Engine;
pub use runtime::{spawn, spawn_with_source, EngineHandle, EngineWorker, RuntimeError, TokioTimer};
pub use timer::{ManualTimer, RoundTimer};
