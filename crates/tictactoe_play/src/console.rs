//! Line-oriented terminal driver.
//!
//! Translates typed commands into engine intent calls, prints the snapshot
//! after each one, and plays the computer's deferred reply when its tick
//! arrives.

use crate::scheduler::{ComputerTurn, TurnScheduler};
use anyhow::{Context, Result};
use std::str::FromStr;
use std::time::Duration;
use tictactoe_engine::{CandidatePicker, GameEngine, Mode, MoveError, Placement, Position};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, info, instrument, warn};

/// Help text listing the commands.
pub const HELP: &str = "\
Commands:
  one | two   start a game against the computer / another player
  1-9         place your mark on that cell (or name it: center, top-left, ...)
  r           restart in the same mode
  m           back to mode selection
  s           print the game as JSON
  h           this help
  q           quit";

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a session in a mode.
    Start(Mode),
    /// Place on a 0-based cell.
    Place(usize),
    /// Restart in the current mode.
    Restart,
    /// Return to mode selection.
    Menu,
    /// Print the snapshot as JSON.
    Show,
    /// Print the help text.
    Help,
    /// Leave the driver.
    Quit,
}

/// Input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("Unknown command '{}' (h for help)", input)]
pub struct ParseCommandError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim().to_lowercase();
        let unknown = || ParseCommandError {
            input: input.clone(),
        };

        match input.as_str() {
            "r" | "restart" => Ok(Command::Restart),
            "m" | "menu" => Ok(Command::Menu),
            "s" | "show" => Ok(Command::Show),
            "h" | "help" | "?" => Ok(Command::Help),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => {
                if let Ok(n) = other.parse::<usize>() {
                    return n.checked_sub(1).map(Command::Place).ok_or_else(unknown);
                }
                // Mode names are words; the digits above are cells.
                match other {
                    "one" | "one-player" | "two" | "two-player" => {
                        Mode::from_str(other).map(Command::Start).map_err(|_| unknown())
                    }
                    _ => Position::from_label(other)
                        .map(|pos| Command::Place(pos.to_index()))
                        .ok_or_else(unknown),
                }
            }
        }
    }
}

/// What the driver should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and keep going.
    Show(String),
    /// Stop the driver.
    Quit,
}

/// Terminal driver around one engine.
#[derive(Debug)]
pub struct Console<P> {
    engine: GameEngine<P>,
    scheduler: TurnScheduler,
    delay: Duration,
}

impl<P: CandidatePicker> Console<P> {
    /// Creates a driver; computer replies wait `delay`.
    pub fn new(engine: GameEngine<P>, scheduler: TurnScheduler, delay: Duration) -> Self {
        Self {
            engine,
            scheduler,
            delay,
        }
    }

    /// The engine being driven.
    pub fn engine(&self) -> &GameEngine<P> {
        &self.engine
    }

    /// True while a computer reply is waiting to fire.
    pub fn computer_pending(&self) -> bool {
        self.scheduler.is_pending()
    }

    /// Renders the board and status line, or the mode prompt.
    pub fn render(&self) -> String {
        match self.engine.snapshot() {
            Some(snapshot) => {
                let mut out = format!("{}\n\n{}", snapshot.board().display(), snapshot.message());
                if let Some(line) = snapshot.winning_line() {
                    out.push_str(&format!("\nWinning line: {}", line));
                }
                if *snapshot.computer_to_move() {
                    out.push_str("\nComputer is thinking...");
                }
                out
            }
            None => format!("{}: one | two", self.engine.status_message()),
        }
    }

    /// Applies one command. Must run inside a tokio runtime, since a human
    /// move against the computer schedules its reply.
    #[instrument(skip(self))]
    pub fn handle(&mut self, command: Command) -> Reply {
        match command {
            Command::Start(mode) => {
                self.scheduler.cancel();
                self.engine.start_session(mode);
                Reply::Show(self.render())
            }
            Command::Restart => {
                self.scheduler.cancel();
                match self.engine.restart() {
                    Ok(_) => Reply::Show(self.render()),
                    Err(e) => self.rejected(e),
                }
            }
            Command::Menu => {
                self.scheduler.cancel();
                self.engine.return_to_mode_selection();
                Reply::Show(self.render())
            }
            Command::Place(cell) => match self.engine.place_mark(cell) {
                Ok(placement) => {
                    self.after_placement(placement);
                    Reply::Show(self.render())
                }
                Err(e) => self.rejected(e),
            },
            Command::Show => match self.engine.snapshot() {
                Some(snapshot) => match snapshot.to_json() {
                    Ok(json) => Reply::Show(json),
                    Err(e) => {
                        warn!(error = %e, "Failed to serialize snapshot");
                        Reply::Show(format!("Cannot show game: {}", e))
                    }
                },
                None => Reply::Show(self.render()),
            },
            Command::Help => Reply::Show(HELP.to_string()),
            Command::Quit => {
                self.scheduler.cancel();
                Reply::Quit
            }
        }
    }

    /// Plays a scheduled computer move. Returns the new view, or `None` when
    /// the tick belongs to a session that no longer exists.
    #[instrument(skip(self))]
    pub fn on_computer_turn(&mut self, tick: ComputerTurn) -> Option<String> {
        match self.engine.computer_move_for(tick.session_id) {
            Ok(placement) => {
                info!(mv = %placement.mv(), "Computer moved");
                self.after_placement(placement);
                Some(self.render())
            }
            Err(e) => {
                debug!(error = %e, "Ignoring computer tick");
                None
            }
        }
    }

    fn after_placement(&mut self, placement: Placement) {
        match placement.status().winner() {
            Some(winner) => info!(%winner, "Game won"),
            None if placement.status().is_over() => info!("Game drawn"),
            None => {}
        }
        if !placement.computer_due() {
            return;
        }
        if let Some(session) = self.engine.session() {
            self.scheduler.schedule(session.id(), self.delay);
        }
    }

    fn rejected(&self, error: MoveError) -> Reply {
        warn!(error = %error, "Command rejected");
        Reply::Show(format!("{}\n{}", error, self.engine.status_message()))
    }

    /// Reads commands from `input` until quit or end of input, writing every
    /// reply to `output`.
    pub async fn run<R, W>(
        mut self,
        input: R,
        mut output: W,
        mut ticks: UnboundedReceiver<ComputerTurn>,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        write_block(&mut output, &self.render()).await?;

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read command")? else {
                        debug!("End of input");
                        break;
                    };
                    if line.trim().is_empty() {
                        continue;
                    }
                    let reply = match line.parse::<Command>() {
                        Ok(command) => self.handle(command),
                        Err(e) => Reply::Show(e.to_string()),
                    };
                    match reply {
                        Reply::Show(text) => write_block(&mut output, &text).await?,
                        Reply::Quit => break,
                    }
                }
                Some(tick) = ticks.recv() => {
                    if let Some(text) = self.on_computer_turn(tick) {
                        write_block(&mut output, &text).await?;
                    }
                }
            }
        }

        info!("Console closed");
        Ok(())
    }
}

async fn write_block<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> Result<()> {
    output
        .write_all(format!("{}\n\n", text).as_bytes())
        .await
        .context("Failed to write output")?;
    output.flush().await.context("Failed to flush output")?;
    Ok(())
}
