//! Board coordinates.

use serde::{Deserialize, Serialize};

/// A `(row, col)` coordinate.
///
/// Signed so that a placement anchor or a piece cell can sit off the board;
/// bounds are checked against the board, not the type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// This position shifted by `offset`.
    #[must_use]
    pub const fn offset(self, offset: Position) -> Self {
        Self {
            row: self.row + offset.row,
            col: self.col + offset.col,
        }
    }

    /// The four orthogonal neighbours: up, down, left, right.
    #[must_use]
    pub const fn neighbours(self) -> [Position; 4] {
        [
            Self::new(self.row - 1, self.col),
            Self::new(self.row + 1, self.col),
            Self::new(self.row, self.col - 1),
            Self::new(self.row, self.col + 1),
        ]
    }

    /// True when the two positions share an edge.
    #[must_use]
    pub fn is_adjacent(self, other: Position) -> bool {
        let dr = (self.row - other.row).abs();
        let dc = (self.col - other.col).abs();
        dr + dc == 1
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
