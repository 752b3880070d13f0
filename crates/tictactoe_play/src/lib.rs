//! Terminal driver for the tic-tac-toe engine.
//!
//! The engine stays synchronous and clock-free. This crate adds what a
//! front end needs around it: configuration, a deferred computer reply that
//! is cancelled on reset, and a line-oriented console.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod console;
mod scheduler;

// Crate-level exports - CLI
pub use cli::{Cli, Command as CliCommand};

// Crate-level exports - Configuration
pub use config::{ConfigError, PlayConfig, DEFAULT_CONFIG_FILE};

// Crate-level exports - Console driver
pub use console::{Command, Console, ParseCommandError, Reply, HELP};

// Crate-level exports - Deferred computer moves
pub use scheduler::{ComputerTurn, TurnScheduler};
