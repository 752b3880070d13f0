//! Win detection logic for tic-tac-toe.

use super::super::{Board, Mark, Position, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Three cells that win when held by one mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine([Position; 3]);

impl WinningLine {
    /// The eight lines in canonical order: rows, then columns, then diagonals.
    ///
    /// When one placement completes several lines, the first match in this
    /// order is the one reported.
    pub const ALL: [WinningLine; 8] = [
        // Rows
        WinningLine([Position::TopLeft, Position::TopCenter, Position::TopRight]),
        WinningLine([Position::MiddleLeft, Position::Center, Position::MiddleRight]),
        WinningLine([Position::BottomLeft, Position::BottomCenter, Position::BottomRight]),
        // Columns
        WinningLine([Position::TopLeft, Position::MiddleLeft, Position::BottomLeft]),
        WinningLine([Position::TopCenter, Position::Center, Position::BottomCenter]),
        WinningLine([Position::TopRight, Position::MiddleRight, Position::BottomRight]),
        // Diagonals
        WinningLine([Position::TopLeft, Position::Center, Position::BottomRight]),
        WinningLine([Position::TopRight, Position::Center, Position::BottomLeft]),
    ];

    /// The three positions of this line.
    pub fn positions(&self) -> [Position; 3] {
        self.0
    }

    /// The three board indices of this line.
    pub fn indices(&self) -> [usize; 3] {
        self.0.map(Position::to_index)
    }

    /// Whether all three cells hold `mark`.
    pub fn is_held_by(&self, board: &Board, mark: Mark) -> bool {
        self.0
            .iter()
            .all(|pos| board.get(*pos) == Square::Occupied(mark))
    }
}

impl std::fmt::Display for WinningLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let [a, b, c] = self.indices();
        write!(f, "[{}, {}, {}]", a, b, c)
    }
}

/// First line, in canonical order, fully held by `mark`.
#[instrument(skip(board))]
pub fn winning_line_for(board: &Board, mark: Mark) -> Option<WinningLine> {
    WinningLine::ALL
        .iter()
        .copied()
        .find(|line| line.is_held_by(board, mark))
}

/// Checks if there is a winner on the board.
///
/// Returns the winning mark with the first completed line in canonical order.
#[instrument(skip(board))]
pub fn check_winner(board: &Board) -> Option<(Mark, WinningLine)> {
    WinningLine::ALL.iter().find_map(|line| {
        let [a, _, _] = line.positions();
        let mark = board.get(a).mark()?;
        line.is_held_by(board, mark).then_some((mark, *line))
    })
}
