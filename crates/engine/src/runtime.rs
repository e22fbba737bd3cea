//! Async runtime around the engine.
//!
//! [`spawn`] moves an [`Engine`] into a background [`EngineWorker`] task that
//! owns it exclusively. Callers talk to it through a cloneable
//! [`EngineHandle`]; each request carries a oneshot reply channel. Round
//! timers are tokio sleep tasks that post the expired round id back to the
//! worker, which serializes expiries with player commands.

use std::time::Duration;

use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use tetrecs_core::{
    GameConfig, GameError, GameListener, GameSnapshot, Piece, PieceSource, PlacementOutcome,
};

use crate::driver::Engine;
use crate::timer::RoundTimer;

/// Capacity of the command channel
const COMMAND_BUFFER: usize = 32;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Game(#[from] GameError),

    #[error("engine worker is no longer running")]
    WorkerClosed,
}

/// Requests handled by the worker
#[derive(Debug)]
pub enum Command {
    Start {
        reply: oneshot::Sender<tetrecs_core::Result<()>>,
    },
    Place {
        x: i8,
        y: i8,
        reply: oneshot::Sender<tetrecs_core::Result<PlacementOutcome>>,
    },
    Rotate {
        steps: i32,
        reply: oneshot::Sender<tetrecs_core::Result<Piece>>,
    },
    Swap {
        reply: oneshot::Sender<tetrecs_core::Result<()>>,
    },
    Regenerate {
        reply: oneshot::Sender<tetrecs_core::Result<()>>,
    },
    Snapshot {
        reply: oneshot::Sender<GameSnapshot>,
    },
    Shutdown,
}

/// Round timer backed by a tokio sleep task
#[derive(Debug)]
pub struct TokioTimer {
    expiry_tx: mpsc::UnboundedSender<u64>,
    pending: Option<JoinHandle<()>>,
}

impl TokioTimer {
    pub fn new(expiry_tx: mpsc::UnboundedSender<u64>) -> Self {
        Self {
            expiry_tx,
            pending: None,
        }
    }
}

impl RoundTimer for TokioTimer {
    fn arm(&mut self, round: u64, delay: Duration) {
        self.cancel();
        debug!(round, delay_ms = delay.as_millis() as u64, "round timer armed");
        let expiry_tx = self.expiry_tx.clone();
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Worker gone means the game is being torn down
            let _ = expiry_tx.send(round);
        }));
    }

    fn cancel(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Background task that owns the engine
pub struct EngineWorker<L> {
    engine: Engine<TokioTimer, L>,
    command_rx: mpsc::Receiver<Command>,
    expiry_rx: mpsc::UnboundedReceiver<u64>,
}

impl<L: GameListener> EngineWorker<L> {
    pub fn new(
        engine: Engine<TokioTimer, L>,
        command_rx: mpsc::Receiver<Command>,
        expiry_rx: mpsc::UnboundedReceiver<u64>,
    ) -> Self {
        Self {
            engine,
            command_rx,
            expiry_rx,
        }
    }

    /// Main worker loop
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                // Commands first: a placement queued before an expiry wins
                biased;
                cmd = self.command_rx.recv() => match cmd {
                    Some(Command::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                Some(round) = self.expiry_rx.recv() => self.handle_expiry(round),
            }
        }
        info!(
            score = self.engine.state().score(),
            "engine worker stopped"
        );
    }

    fn handle_expiry(&mut self, round: u64) {
        match self.engine.timer_fired(round) {
            Ok(Some(outcome)) => debug!(round, ?outcome, "round expired"),
            Ok(None) => {}
            Err(e) => warn!(round, error = %e, "round expiry failed"),
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        let delivered = match cmd {
            Command::Start { reply } => reply.send(self.engine.start()).is_ok(),
            Command::Place { x, y, reply } => reply.send(self.engine.place(x, y)).is_ok(),
            Command::Rotate { steps, reply } => reply.send(self.engine.rotate(steps)).is_ok(),
            Command::Swap { reply } => reply.send(self.engine.swap()).is_ok(),
            Command::Regenerate { reply } => reply.send(self.engine.regenerate()).is_ok(),
            Command::Snapshot { reply } => reply.send(self.engine.snapshot()).is_ok(),
            Command::Shutdown => true,
        };
        if !delivered {
            debug!("reply channel closed (caller dropped)");
        }
    }
}

/// Cloneable client for a running engine worker
#[derive(Debug, Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<Command>,
}

impl EngineHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(make(reply_tx))
            .await
            .map_err(|_| RuntimeError::WorkerClosed)?;
        reply_rx.await.map_err(|_| RuntimeError::WorkerClosed)
    }

    pub async fn start(&self) -> Result<()> {
        Ok(self.request(|reply| Command::Start { reply }).await??)
    }

    pub async fn place(&self, x: i8, y: i8) -> Result<PlacementOutcome> {
        Ok(self.request(|reply| Command::Place { x, y, reply }).await??)
    }

    /// Rotate the current piece by `steps` clockwise quarter turns
    pub async fn rotate(&self, steps: i32) -> Result<Piece> {
        Ok(self.request(|reply| Command::Rotate { steps, reply }).await??)
    }

    pub async fn swap(&self) -> Result<()> {
        Ok(self.request(|reply| Command::Swap { reply }).await??)
    }

    pub async fn regenerate(&self) -> Result<()> {
        Ok(self.request(|reply| Command::Regenerate { reply }).await??)
    }

    pub async fn snapshot(&self) -> Result<GameSnapshot> {
        self.request(|reply| Command::Snapshot { reply }).await
    }

    /// Ask the worker to stop; pending round timers are dropped with it
    pub async fn shutdown(&self) -> Result<()> {
        self.command_tx
            .send(Command::Shutdown)
            .await
            .map_err(|_| RuntimeError::WorkerClosed)
    }
}

/// Start an engine worker on the current tokio runtime
pub fn spawn<L>(config: &GameConfig, listener: L) -> Result<(EngineHandle, JoinHandle<()>)>
where
    L: GameListener + Send + 'static,
{
    spawn_with_source(config, PieceSource::random(config.seed), listener)
}

/// Like [`spawn`], drawing pieces from `source`
pub fn spawn_with_source<L>(
    config: &GameConfig,
    source: PieceSource,
    listener: L,
) -> Result<(EngineHandle, JoinHandle<()>)>
where
    L: GameListener + Send + 'static,
{
    let (command_tx, command_rx) = mpsc::channel(COMMAND_BUFFER);
    let (expiry_tx, expiry_rx) = mpsc::unbounded_channel();

    let engine = Engine::with_source(config, source, TokioTimer::new(expiry_tx), listener)?;
    let worker = EngineWorker::new(engine, command_rx, expiry_rx);
    let join = tokio::spawn(worker.run());

    info!(
        mode = config.mode.as_str(),
        cols = config.cols,
        rows = config.rows,
        seed = config.seed,
        "engine worker spawned"
    );
    Ok((EngineHandle { command_tx }, join))
}
