//! Monotonic board invariant: squares never change once set.

use super::super::engine::Session;
use super::super::{Board, Square};
use super::Invariant;

/// Invariant: Board squares are monotonic (never overwritten).
///
/// Replaying the history onto an empty board, each move must land on an
/// empty square and the result must equal the live board. This also means
/// every occupied square has exactly one move behind it.
pub struct MonotonicBoardInvariant;

impl Invariant<Session> for MonotonicBoardInvariant {
    fn holds(session: &Session) -> bool {
        let mut reconstructed = Board::new();

        for mv in session.history() {
            if !reconstructed.is_empty(mv.position) {
                return false;
            }
            reconstructed.set(mv.position, Square::Occupied(mv.mark));
        }

        reconstructed == *session.board()
    }

    fn description() -> &'static str {
        "Board squares are monotonic (never overwritten)"
    }
}
