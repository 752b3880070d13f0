//! Core domain types for tic-tac-toe.

use super::position::Position;
use serde::{Deserialize, Serialize};

/// A player's mark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display,
)]
pub enum Mark {
    /// X always moves first.
    X,
    /// O moves second; computer-controlled against the computer.
    O,
}

impl Mark {
    /// Returns the other mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

/// Contents of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl Square {
    /// Returns the mark in this square, if any.
    pub fn mark(self) -> Option<Mark> {
        match self {
            Square::Empty => None,
            Square::Occupied(mark) => Some(mark),
        }
    }
}

/// 3x3 tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of squares holding `mark`.
    pub fn count(&self, mark: Mark) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(mark))
            .count()
    }

    /// Empty positions in ascending index order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based cell number.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    Square::Occupied(mark) => mark.to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether O is played by a second human or by the computer.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
pub enum Mode {
    /// Two humans share the board.
    #[serde(rename = "two-player")]
    #[strum(to_string = "two-player", serialize = "two", serialize = "2")]
    TwoPlayer,
    /// One human (X) against the random computer (O).
    #[serde(rename = "one-player")]
    #[strum(to_string = "one-player", serialize = "one", serialize = "1")]
    OnePlayerVsComputer,
}

impl Mode {
    /// The mark the computer plays in this mode, if any.
    pub fn computer_mark(self) -> Option<Mark> {
        match self {
            Mode::TwoPlayer => None,
            Mode::OnePlayerVsComputer => Some(Mark::O),
        }
    }
}

/// Current status of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Game ended in a win.
    Won(Mark),
    /// Game ended in a draw.
    Draw,
}

impl GameStatus {
    /// Returns true once the game is won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Mark> {
        match self {
            GameStatus::Won(mark) => Some(*mark),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_display_numbers_empty_squares() {
        let mut board = Board::new();
        board.set(Position::Center, Square::Occupied(Mark::X));
        board.set(Position::BottomRight, Square::Occupied(Mark::O));
        assert_eq!(board.display(), "1|2|3\n-+-+-\n4|X|6\n-+-+-\n7|8|O");
    }

    #[test]
    fn test_count_marks() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Mark::X));
        board.set(Position::TopRight, Square::Occupied(Mark::X));
        board.set(Position::Center, Square::Occupied(Mark::O));
        assert_eq!(board.count(Mark::X), 2);
        assert_eq!(board.count(Mark::O), 1);
    }

    #[test]
    fn test_mode_parses_short_names() {
        assert_eq!(Mode::from_str("one"), Ok(Mode::OnePlayerVsComputer));
        assert_eq!(Mode::from_str("2"), Ok(Mode::TwoPlayer));
        assert_eq!(Mode::from_str("one-player"), Ok(Mode::OnePlayerVsComputer));
        assert!(Mode::from_str("three").is_err());
        assert_eq!(Mode::TwoPlayer.to_string(), "two-player");
    }

    #[test]
    fn test_status_winner_only_for_wins() {
        assert_eq!(GameStatus::Won(Mark::O).winner(), Some(Mark::O));
        assert_eq!(GameStatus::Draw.winner(), None);
        assert_eq!(GameStatus::InProgress.winner(), None);
        assert!(GameStatus::Draw.is_over());
        assert!(!GameStatus::InProgress.is_over());
    }

    #[test]
    fn test_only_vs_computer_has_computer_mark() {
        assert_eq!(Mode::TwoPlayer.computer_mark(), None);
        assert_eq!(Mode::OnePlayerVsComputer.computer_mark(), Some(Mark::O));
    }
}
