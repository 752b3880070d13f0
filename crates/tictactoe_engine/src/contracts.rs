//! Contract-based validation for tic-tac-toe moves.
//!
//! Contracts define correctness through preconditions and postconditions:
//! {P} action {Q}. The engine checks the precondition before every placement
//! and the postcondition after it in debug builds.

use super::action::{Move, MoveError};
use super::engine::Session;
use super::invariants::{InvariantSet, SessionInvariants};
use super::GameStatus;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the game has not ended.
pub struct SessionActive;

impl SessionActive {
    /// Rejects moves once the status is terminal.
    #[instrument(skip(session))]
    pub fn check(session: &Session) -> Result<(), MoveError> {
        if session.status() == GameStatus::InProgress {
            Ok(())
        } else {
            Err(MoveError::SessionNotActive)
        }
    }
}

/// Precondition: the square at the move's position must be empty.
pub struct SquareIsEmpty;

impl SquareIsEmpty {
    /// Rejects moves onto an occupied square.
    #[instrument(skip(session))]
    pub fn check(mv: &Move, session: &Session) -> Result<(), MoveError> {
        if session.board().is_empty(mv.position) {
            Ok(())
        } else {
            Err(MoveError::OccupiedCell(mv.position))
        }
    }
}

/// Precondition: the move's mark holds the turn.
pub struct MarksTurn;

impl MarksTurn {
    /// Rejects a mark moving out of turn.
    #[instrument(skip(session))]
    pub fn check(mv: &Move, session: &Session) -> Result<(), MoveError> {
        if mv.mark == session.turn() {
            Ok(())
        } else {
            Err(MoveError::WrongTurn(session.turn()))
        }
    }
}

/// Contract for placing a mark.
///
/// Preconditions:
/// - Game still in progress
/// - Square is empty
/// - The mark holds the turn
///
/// Postconditions:
/// - Exactly one more move in history
/// - All [`SessionInvariants`] hold
pub struct MoveContract;

impl Contract<Session, Move> for MoveContract {
    fn pre(session: &Session, mv: &Move) -> Result<(), MoveError> {
        SessionActive::check(session)?;
        SquareIsEmpty::check(mv, session)?;
        MarksTurn::check(mv, session)?;
        Ok(())
    }

    fn post(before: &Session, after: &Session) -> Result<(), MoveError> {
        if after.history().len() != before.history().len() + 1 {
            warn!(
                before = before.history().len(),
                after = after.history().len(),
                "Move did not add exactly one history entry"
            );
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: history must grow by one move".to_string(),
            ));
        }

        SessionInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Postcondition failed");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FixedPicker, GameEngine, Mark, Mode, Position, Square};

    fn session_after(cells: &[usize]) -> Session {
        let mut engine = GameEngine::with_picker(FixedPicker(0));
        engine.replay(Mode::TwoPlayer, cells).expect("replay");
        engine.session().expect("session").clone()
    }

    #[test]
    fn test_precondition_empty_square() {
        let session = session_after(&[]);
        let mv = Move::new(Mark::X, Position::Center);
        assert!(MoveContract::pre(&session, &mv).is_ok());
    }

    #[test]
    fn test_precondition_occupied_square() {
        let session = session_after(&[4]);
        let mv = Move::new(Mark::O, Position::Center);
        assert_eq!(
            MoveContract::pre(&session, &mv),
            Err(MoveError::OccupiedCell(Position::Center))
        );
    }

    #[test]
    fn test_precondition_wrong_turn() {
        let session = session_after(&[]);
        let mv = Move::new(Mark::O, Position::Center);
        assert_eq!(
            MoveContract::pre(&session, &mv),
            Err(MoveError::WrongTurn(Mark::X))
        );
    }

    #[test]
    fn test_precondition_finished_game() {
        let session = session_after(&[0, 3, 1, 4, 2]);
        let mv = Move::new(Mark::X, Position::BottomRight);
        assert_eq!(
            MoveContract::pre(&session, &mv),
            Err(MoveError::SessionNotActive)
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = session_after(&[4]);
        let after = session_after(&[4, 0]);
        assert!(MoveContract::post(&before, &after).is_ok());
    }

    #[test]
    fn test_postcondition_detects_corruption() {
        let before = session_after(&[4]);
        let mut after = session_after(&[4, 0]);
        after.board.set(Position::BottomRight, Square::Occupied(Mark::O));
        assert!(matches!(
            MoveContract::post(&before, &after),
            Err(MoveError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_postcondition_requires_one_new_move() {
        let before = session_after(&[4]);
        assert!(MoveContract::post(&before, &before).is_err());
    }
}
