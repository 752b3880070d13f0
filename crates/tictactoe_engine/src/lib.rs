//! Tic-tac-toe session engine.
//!
//! One [`GameEngine`] owns the board, the turn, the status and the computer
//! opponent's random policy for a single session. A presentation layer
//! issues intent calls and renders the [`Snapshot`] it reads back.
//!
//! # Example
//!
//! ```
//! use tictactoe_engine::{FixedPicker, GameEngine, GameStatus, Mode};
//!
//! let mut engine = GameEngine::with_picker(FixedPicker(0));
//! engine.start_session(Mode::OnePlayerVsComputer);
//!
//! let placement = engine.place_mark(0).expect("X opens in the corner");
//! assert!(placement.computer_due());
//!
//! let reply = engine.computer_move().expect("computer's turn");
//! assert_eq!(reply.mv().position.to_index(), 1);
//! assert_eq!(reply.status(), GameStatus::InProgress);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod engine;
mod invariants;
mod picker;
mod position;
mod rules;
mod snapshot;
mod types;

// Crate-level exports - Domain types
pub use position::Position;
pub use types::{Board, GameStatus, Mark, Mode, Square};

// Crate-level exports - Moves and errors
pub use action::{Move, MoveError};

// Crate-level exports - Rules
pub use rules::{check_winner, is_draw, is_full, winning_line_for, WinningLine};

// Crate-level exports - Engine
pub use engine::{GameEngine, Placement, Session, SessionId};
pub use picker::{CandidatePicker, FixedPicker, UniformPicker};
pub use snapshot::Snapshot;

// Crate-level exports - Contracts and invariants
pub use contracts::{Contract, MoveContract};
pub use invariants::{
    AlternatingTurnInvariant, Invariant, InvariantSet, InvariantViolation,
    MonotonicBoardInvariant, SessionInvariants, StatusConsistentInvariant,
};
