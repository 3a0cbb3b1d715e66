//! Piece shapes.
//!
//! Each shape is a fixed set of cell offsets anchored at `(0, 0)`: the
//! smallest row and the smallest column that appear are both zero.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::CatalogError;

/// A catalog shape.
///
/// Declaration order is the catalog order used by seeded generation
/// (`next_int(0, 11)` picks from this list).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShapeKind {
    I2,
    I3,
    I4,
    I5,
    O2x2,
    O3x3,
    L3,
    L4,
    T3,
    T4,
    Z3,
    S3,
}

impl ShapeKind {
    /// Every shape, in catalog order.
    pub const ALL: [ShapeKind; 12] = [
        ShapeKind::I2,
        ShapeKind::I3,
        ShapeKind::I4,
        ShapeKind::I5,
        ShapeKind::O2x2,
        ShapeKind::O3x3,
        ShapeKind::L3,
        ShapeKind::L4,
        ShapeKind::T3,
        ShapeKind::T4,
        ShapeKind::Z3,
        ShapeKind::S3,
    ];

    /// Catalog index.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Shape at a catalog index, if any.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Stored name (`"I3"`, `"O2x2"`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            ShapeKind::I2 => "I2",
            ShapeKind::I3 => "I3",
            ShapeKind::I4 => "I4",
            ShapeKind::I5 => "I5",
            ShapeKind::O2x2 => "O2x2",
            ShapeKind::O3x3 => "O3x3",
            ShapeKind::L3 => "L3",
            ShapeKind::L4 => "L4",
            ShapeKind::T3 => "T3",
            ShapeKind::T4 => "T4",
            ShapeKind::Z3 => "Z3",
            ShapeKind::S3 => "S3",
        }
    }

    /// Raw `(row, col)` offsets.
    #[must_use]
    pub const fn cells(self) -> &'static [(i32, i32)] {
        match self {
            ShapeKind::I2 => &[(0, 0), (0, 1)],
            ShapeKind::I3 => &[(0, 0), (0, 1), (0, 2)],
            ShapeKind::I4 => &[(0, 0), (0, 1), (0, 2), (0, 3)],
            ShapeKind::I5 => &[(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)],
            ShapeKind::O2x2 => &[(0, 0), (0, 1), (1, 0), (1, 1)],
            ShapeKind::O3x3 => &[
                (0, 0), (0, 1), (0, 2),
                (1, 0), (1, 1), (1, 2),
                (2, 0), (2, 1), (2, 2),
            ],
            ShapeKind::L3 => &[(0, 0), (1, 0), (2, 0), (2, 1)],
            ShapeKind::L4 => &[(0, 0), (1, 0), (2, 0), (3, 0), (3, 1)],
            ShapeKind::T3 => &[(0, 0), (0, 1), (0, 2), (1, 1)],
            ShapeKind::T4 => &[(0, 0), (0, 1), (0, 2), (1, 1), (2, 1)],
            ShapeKind::Z3 => &[(0, 0), (0, 1), (1, 1), (1, 2)],
            ShapeKind::S3 => &[(0, 1), (0, 2), (1, 0), (1, 1)],
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ShapeKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::shapes().lookup(s)
    }
}
