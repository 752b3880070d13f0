//! Tic-tac-toe - terminal driver
//!
//! Plays interactively on stdin/stdout or rebuilds a recorded game.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use tictactoe_engine::{GameEngine, Mode, UniformPicker};
use tictactoe_play::{Cli, CliCommand, Console, PlayConfig, TurnScheduler};
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so the board on stdout stays readable.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PlayConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command.unwrap_or_default() {
        CliCommand::Play { mode, delay_ms } => {
            run_play(config.with_overrides(mode, cli.seed, delay_ms)).await
        }
        CliCommand::Replay { mode, cells, json } => run_replay(mode, &cells, json),
    }
}

fn engine_for(seed: Option<u64>) -> GameEngine<UniformPicker> {
    match seed {
        Some(seed) => GameEngine::seeded(seed),
        None => GameEngine::new(),
    }
}

/// Run the interactive console
#[instrument(skip_all)]
async fn run_play(config: PlayConfig) -> Result<()> {
    info!(?config, "Starting tic-tac-toe console");

    let mut engine = engine_for(*config.seed());
    if let Some(mode) = config.mode() {
        engine.start_session(*mode);
    }

    let (tx, rx) = mpsc::unbounded_channel();
    let console = Console::new(engine, TurnScheduler::new(tx), config.computer_delay());

    let stdin = BufReader::new(tokio::io::stdin());
    console.run(stdin, tokio::io::stdout(), rx).await
}

/// Replay cells given 1-based and print the final position
#[instrument]
fn run_replay(mode: Mode, cells: &[usize], json: bool) -> Result<()> {
    let indices = cells
        .iter()
        .map(|&c| {
            c.checked_sub(1)
                .with_context(|| format!("Cell {} is not on the board (use 1-9)", c))
        })
        .collect::<Result<Vec<_>>>()?;

    // Computer cells come from the list, so the seed never matters here.
    let mut engine = engine_for(Some(0));
    let snapshot = engine
        .replay(mode, &indices)
        .with_context(|| {
            let played = engine.session().map_or(0, |s| s.history().len());
            format!("Replay stopped after {} of {} cells", played, indices.len())
        })?;

    if json {
        println!("{}", snapshot.to_json()?);
    } else {
        println!("{}\n\n{}", snapshot.board().display(), snapshot.message());
        if let Some(line) = snapshot.winning_line() {
            println!("Winning line: {}", line);
        }
    }
    Ok(())
}
