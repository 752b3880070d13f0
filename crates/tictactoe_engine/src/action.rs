//! First-class action types for tic-tac-toe.
//!
//! Moves are domain events, not side effects. They record which mark went
//! where and are kept in session history for replay and invariant checks.

use super::{Mark, Position};
use serde::{Deserialize, Serialize};

/// A move in tic-tac-toe: a mark placed at a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Move {
    /// The mark placed.
    pub mark: Mark,
    /// Where it was placed.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.mark, self.position.label())
    }
}

/// Why a placement or computer move was rejected.
///
/// Everything except [`MoveError::InvariantViolation`] comes from stale or
/// duplicate input and leaves the engine untouched.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    /// Cell index outside 0-8.
    #[display("Cell {} is not on the board", _0)]
    InvalidCell(#[error(not(source))] usize),

    /// The square is already occupied.
    #[display("Square {} is already occupied", _0)]
    OccupiedCell(#[error(not(source))] Position),

    /// No session, or the session already ended.
    #[display("No game in progress")]
    SessionNotActive,

    /// The requested mover does not hold the turn.
    #[display("Out of turn: {} is to move", _0)]
    WrongTurn(#[error(not(source))] Mark),

    /// Session state broke an invariant after a move.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}
