//! Cell contents.

use serde::{Deserialize, Serialize};

use crate::catalog::Color;

/// What a board cell holds.
///
/// A block and a gem never share a cell: placing a block over a gem
/// replaces the gem, and gems are never written over blocks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "color", rename_all = "lowercase")]
pub enum CellState {
    #[default]
    Empty,
    /// A placed block of the given color.
    Occupied(Color),
    /// A gem dropped by a line clear. Counts as free for placement.
    Gem(Color),
}

impl CellState {
    /// True for a placed block.
    #[must_use]
    pub const fn is_occupied(self) -> bool {
        matches!(self, CellState::Occupied(_))
    }

    /// True if a piece may cover this cell.
    #[must_use]
    pub const fn is_free(self) -> bool {
        !self.is_occupied()
    }

    #[must_use]
    pub const fn is_gem(self) -> bool {
        matches!(self, CellState::Gem(_))
    }

    /// Color of the block, if this is a block.
    #[must_use]
    pub const fn block_color(self) -> Option<Color> {
        match self {
            CellState::Occupied(c) => Some(c),
            _ => None,
        }
    }

    /// Color of the gem, if this is a gem.
    #[must_use]
    pub const fn gem_color(self) -> Option<Color> {
        match self {
            CellState::Gem(c) => Some(c),
            _ => None,
        }
    }

    /// Single-character rendering: `.` empty, uppercase block, lowercase gem.
    #[must_use]
    pub fn to_char(self) -> char {
        match self {
            CellState::Empty => '.',
            CellState::Occupied(c) => color_char(c).to_ascii_uppercase(),
            CellState::Gem(c) => color_char(c),
        }
    }

    /// Inverse of [`to_char`](Self::to_char).
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        if ch == '.' {
            return Some(CellState::Empty);
        }
        let color = Color::ALL
            .iter()
            .copied()
            .find(|c| color_char(*c) == ch.to_ascii_lowercase())?;
        if ch.is_ascii_uppercase() {
            Some(CellState::Occupied(color))
        } else {
            Some(CellState::Gem(color))
        }
    }
}

fn color_char(color: Color) -> char {
    match color {
        Color::Red => 'r',
        Color::Blue => 'b',
        Color::Green => 'g',
        Color::Yellow => 'y',
        Color::Purple => 'p',
        Color::Orange => 'o',
    }
}
