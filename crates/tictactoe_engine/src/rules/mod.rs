//! Game rules for tic-tac-toe.
//!
//! Pure functions over a [`Board`](super::Board), kept apart from session
//! state so the engine and the invariant checks share one definition.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{check_winner, winning_line_for, WinningLine};
