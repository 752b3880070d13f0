//! Alternating turn invariant: marks alternate X, O, X, O, ...

use super::super::engine::Session;
use super::super::{GameStatus, Mark};
use super::Invariant;

/// Invariant: Marks alternate turns, X first.
///
/// On the board this means the X count minus the O count is 0 or 1. While
/// the game runs, the turn belongs to the mark that did not move last.
pub struct AlternatingTurnInvariant;

impl Invariant<Session> for AlternatingTurnInvariant {
    fn holds(session: &Session) -> bool {
        let history = session.history();

        if let Some(first) = history.first()
            && first.mark != Mark::X
        {
            return false;
        }

        if history.windows(2).any(|w| w[0].mark == w[1].mark) {
            return false;
        }

        let x = session.board().count(Mark::X);
        let o = session.board().count(Mark::O);
        if x < o || x - o > 1 {
            return false;
        }

        match session.status() {
            GameStatus::InProgress => {
                let expected = if x == o { Mark::X } else { Mark::O };
                session.turn() == expected
            }
            // The turn stays with the mark that finished the game.
            _ => history.last().is_none_or(|last| last.mark == session.turn()),
        }
    }

    fn description() -> &'static str {
        "Marks alternate turns (X, O, X, O, ...)"
    }
}
