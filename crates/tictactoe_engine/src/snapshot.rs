//! Read-only view of a session for presentation layers.

use super::action::Move;
use super::engine::{Session, SessionId};
use super::rules::WinningLine;
use super::{Board, GameStatus, Mark, Mode};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Everything a front end needs to draw the board and the status line.
///
/// Snapshots are detached copies; holding one never blocks the engine.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Session the snapshot was taken from.
    session_id: SessionId,
    /// Mode of that session.
    mode: Mode,
    /// Board contents.
    board: Board,
    /// Mark to move, or the mark that ended the game.
    turn: Mark,
    /// Current status.
    status: GameStatus,
    /// Cells to highlight after a win.
    winning_line: Option<WinningLine>,
    /// Moves in play order.
    history: Vec<Move>,
    /// Human-readable status line.
    message: String,
    /// The computer holds the turn.
    computer_to_move: bool,
}

impl From<&Session> for Snapshot {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id(),
            mode: session.mode(),
            board: session.board().clone(),
            turn: session.turn(),
            status: session.status(),
            winning_line: session.winning_line(),
            history: session.history().to_vec(),
            message: session.status_message(),
            computer_to_move: session.is_computer_turn(),
        }
    }
}

impl Snapshot {
    /// Serializes the snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
