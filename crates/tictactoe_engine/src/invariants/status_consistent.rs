//! Status consistency invariant: the recorded status matches the board.

use super::super::engine::Session;
use super::super::rules::{check_winner, is_full, winning_line_for};
use super::super::GameStatus;
use super::Invariant;

/// Invariant: Status agrees with the board.
///
/// - `Won(m)` only when a line is fully held by `m`, and the recorded
///   winning line is the first such line.
/// - `Draw` only on a full board with no completed line.
/// - `InProgress` only when no line is complete and a square is empty.
pub struct StatusConsistentInvariant;

impl Invariant<Session> for StatusConsistentInvariant {
    fn holds(session: &Session) -> bool {
        let board = session.board();
        match session.status() {
            GameStatus::Won(mark) => {
                let line = winning_line_for(board, mark);
                line.is_some() && line == session.winning_line()
            }
            GameStatus::Draw => {
                is_full(board) && check_winner(board).is_none() && session.winning_line().is_none()
            }
            GameStatus::InProgress => {
                !is_full(board) && check_winner(board).is_none() && session.winning_line().is_none()
            }
        }
    }

    fn description() -> &'static str {
        "Status matches the board (win needs a line, draw needs a full board)"
    }
}
