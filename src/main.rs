//! Line-oriented TetrECS runner (default binary).
//!
//! Reads commands from stdin and prints game notifications to stdout; logs go
//! to stderr. Configuration comes from `TETRECS_*` environment variables,
//! overridden by `--special` and `--seed N`.
//!
//! Commands: `place X Y`, `cw`, `ccw`, `rotate N`, `swap`, `regen`, `status`,
//! `quit`.

use std::collections::BTreeSet;

use anyhow::{bail, Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use tetrecs::core::{GameConfig, GameListener, Piece};
use tetrecs::engine::{spawn, EngineHandle, RuntimeError};
use tetrecs::types::{Coord, GameMode};

/// One parsed stdin line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Input {
    Place { x: i8, y: i8 },
    Rotate(i32),
    Swap,
    Regenerate,
    Status,
    Quit,
}

fn parse_input(line: &str) -> Result<Option<Input>> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };

    let input = match word.to_ascii_lowercase().as_str() {
        "place" | "p" => {
            let x = words.next().context("usage: place X Y")?.parse()?;
            let y = words.next().context("usage: place X Y")?.parse()?;
            Input::Place { x, y }
        }
        "cw" => Input::Rotate(1),
        "ccw" => Input::Rotate(-1),
        "rotate" => Input::Rotate(words.next().context("usage: rotate N")?.parse()?),
        "swap" => Input::Swap,
        "regen" | "regenerate" => Input::Regenerate,
        "status" => Input::Status,
        "quit" | "exit" => Input::Quit,
        other => bail!("unknown command: {other}"),
    };
    Ok(Some(input))
}

fn parse_args(mut config: GameConfig, args: impl IntoIterator<Item = String>) -> Result<GameConfig> {
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--special" => config = config.with_mode(GameMode::Special),
            "--seed" => {
                let seed = args.next().context("--seed needs a value")?;
                config = config.with_seed(seed.parse().context("invalid --seed")?);
            }
            other => bail!("unknown argument: {other}"),
        }
    }
    Ok(config)
}

fn describe(piece: &Piece) -> String {
    format!("{}({})", piece.kind.as_str(), piece.rotation.as_str())
}

/// Prints every notification; forwards the final score so the input loop can
/// stop
struct PrintListener {
    game_over_tx: mpsc::UnboundedSender<u32>,
}

impl GameListener for PrintListener {
    fn on_piece_changed(&mut self, current: &Piece, upcoming: &Piece) {
        println!("pieces: current={} upcoming={}", describe(current), describe(upcoming));
    }

    fn on_lines_cleared(&mut self, cells: &BTreeSet<Coord>) {
        println!("cleared {} blocks", cells.len());
    }

    fn on_score_changed(&mut self, score: u32) {
        println!("score: {score}");
    }

    fn on_round_armed(&mut self, delay_ms: u32, game_over: bool) {
        if !game_over {
            println!("round: {delay_ms} ms");
        }
    }

    fn on_game_over(&mut self, final_score: u32) {
        println!("game over: final score {final_score}");
        let _ = self.game_over_tx.send(final_score);
    }
}

async fn print_status(handle: &EngineHandle) -> Result<()> {
    let snapshot = handle.snapshot().await?;
    print!("{}", snapshot.board_text());
    println!("{}", serde_json::to_string(&snapshot)?);
    Ok(())
}

/// Run one command; returns false when the loop should stop
async fn execute(handle: &EngineHandle, input: Input) -> Result<bool> {
    let result = match input {
        Input::Place { x, y } => handle.place(x, y).await.map(|outcome| {
            if outcome.lines_cleared > 0 {
                println!(
                    "{} lines, {} blocks, +{}",
                    outcome.lines_cleared, outcome.blocks_cleared, outcome.score_delta
                );
            }
        }),
        Input::Rotate(steps) => handle.rotate(steps).await.map(|_| ()),
        Input::Swap => handle.swap().await,
        Input::Regenerate => handle.regenerate().await,
        Input::Status => {
            print_status(handle).await?;
            Ok(())
        }
        Input::Quit => return Ok(false),
    };

    match result {
        Ok(()) => Ok(true),
        Err(RuntimeError::Game(e)) => {
            println!("error[{}]: {e}", e.code());
            Ok(true)
        }
        Err(e) => Err(e.into()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = parse_args(GameConfig::from_env(), std::env::args().skip(1))?;
    config.validate()?;

    let (game_over_tx, mut game_over_rx) = mpsc::unbounded_channel();
    let (handle, worker) = spawn(&config, PrintListener { game_over_tx })?;
    handle.start().await?;
    print_status(&handle).await?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_input(&line) {
                    Ok(Some(input)) => {
                        if !execute(&handle, input).await? {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("error: {e}"),
                }
            }
            Some(_) = game_over_rx.recv() => break,
        }
    }

    handle.shutdown().await?;
    worker.await?;
    Ok(())
}
