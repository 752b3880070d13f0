//! Command-line interface for the tic-tac-toe driver.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_engine::Mode;

/// Tic-tac-toe for two players or against a random computer
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Tic-tac-toe in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file (defaults to ./tictactoe.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed for the computer's moves
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Play interactively
    Play {
        /// Start directly in this mode: one | two
        #[arg(short, long)]
        mode: Option<Mode>,

        /// Pause before the computer answers, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Rebuild a game from a list of cells and print the result
    Replay {
        /// Mode the game was played in: one | two
        #[arg(short, long, default_value = "two")]
        mode: Mode,

        /// Cells in play order, 1-9, comma separated
        #[arg(value_delimiter = ',', required = true)]
        cells: Vec<usize>,

        /// Print the final game as JSON instead of a board
        #[arg(long)]
        json: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Play {
            mode: None,
            delay_ms: None,
        }
    }
}
