//! Cell positions on the tic-tac-toe board.

use super::types::Board;
use serde::{Deserialize, Serialize};

/// One of the nine cells, declared in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Cell 0.
    TopLeft,
    /// Cell 1.
    TopCenter,
    /// Cell 2.
    TopRight,
    /// Cell 3.
    MiddleLeft,
    /// Cell 4.
    Center,
    /// Cell 5.
    MiddleRight,
    /// Cell 6.
    BottomLeft,
    /// Cell 7.
    BottomCenter,
    /// Cell 8.
    BottomRight,
}

impl Position {
    /// All 9 positions in index order.
    pub const ALL: [Position; 9] = [
        Position::TopLeft,
        Position::TopCenter,
        Position::TopRight,
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ];

    /// Human-readable name, e.g. `Top-left`.
    pub fn label(&self) -> &'static str {
        match self {
            Position::TopLeft => "Top-left",
            Position::TopCenter => "Top-center",
            Position::TopRight => "Top-right",
            Position::MiddleLeft => "Middle-left",
            Position::Center => "Center",
            Position::MiddleRight => "Middle-right",
            Position::BottomLeft => "Bottom-left",
            Position::BottomCenter => "Bottom-center",
            Position::BottomRight => "Bottom-right",
        }
    }

    /// Row-major cell index, 0-8.
    pub fn to_index(self) -> usize {
        self as usize
    }

    /// Position for a cell index, `None` outside 0-8.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Looks a position up by its label, ignoring case and surrounding space.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|pos| pos.label().eq_ignore_ascii_case(label))
    }

    /// Empty cells of `board`, lowest index first.
    pub fn valid_moves(board: &Board) -> Vec<Position> {
        Self::ALL
            .into_iter()
            .filter(|pos| board.is_empty(*pos))
            .collect()
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, pos) in Position::ALL.iter().enumerate() {
            assert_eq!(pos.to_index(), i);
            assert_eq!(Position::from_index(i), Some(*pos));
        }
    }

    #[test]
    fn test_from_label() {
        assert_eq!(Position::from_label(" center "), Some(Position::Center));
        assert_eq!(Position::from_label("BOTTOM-RIGHT"), Some(Position::BottomRight));
        assert_eq!(Position::from_label("corner"), None);
        assert_eq!(Position::from_index(9), None);
    }
}
