//! Pieces dealt to the player.

use serde::{Deserialize, Serialize};

use crate::catalog::{bounding_box, shapes, Color, Offsets, ShapeKind};
use crate::core::Position;

/// Identifier of a dealt piece, unique within a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PieceId(pub u64);

impl PieceId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for PieceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "piece-{}", self.0)
    }
}

/// A colored shape ready to be placed.
///
/// Immutable: rotation returns a new piece.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    id: PieceId,
    kind: ShapeKind,
    color: Color,
    offsets: Offsets,
    width: i32,
    height: i32,
}

impl Piece {
    /// Build a piece from the catalog shape.
    #[must_use]
    pub fn new(id: PieceId, kind: ShapeKind, color: Color) -> Self {
        let def = shapes().get(kind);
        Self {
            id,
            kind,
            color,
            offsets: def.offsets.clone(),
            width: def.width,
            height: def.height,
        }
    }

    #[must_use]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Cell offsets relative to the placement anchor.
    #[must_use]
    pub fn offsets(&self) -> &[Position] {
        &self.offsets
    }

    #[must_use]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells.
    #[must_use]
    pub fn size(&self) -> usize {
        self.offsets.len()
    }

    /// Board cells covered when anchored at `(row, col)`.
    pub fn cells_at(&self, row: i32, col: i32) -> impl Iterator<Item = Position> + '_ {
        let anchor = Position::new(row, col);
        self.offsets.iter().map(move |o| anchor.offset(*o))
    }

    /// The same piece turned 90° clockwise.
    #[must_use]
    pub fn rotated(&self) -> Self {
        let offsets: Offsets = self
            .offsets
            .iter()
            .map(|p| Position::new(p.col, self.height - 1 - p.row))
            .collect();
        let (width, height) = bounding_box(&offsets);
        Self {
            offsets,
            width,
            height,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_from_catalog() {
        let piece = Piece::new(PieceId::new(7), ShapeKind::L3, Color::Green);
        assert_eq!(piece.id().to_string(), "piece-7");
        assert_eq!(piece.size(), 4);
        assert_eq!((piece.width(), piece.height()), (2, 3));
    }

    #[test]
    fn test_cells_at() {
        let piece = Piece::new(PieceId::new(1), ShapeKind::I3, Color::Red);
        let cells: Vec<_> = piece.cells_at(2, 4).collect();
        assert_eq!(
            cells,
            vec![Position::new(2, 4), Position::new(2, 5), Position::new(2, 6)]
        );
    }

    #[test]
    fn test_rotate_line() {
        let piece = Piece::new(PieceId::new(1), ShapeKind::I3, Color::Red);
        let turned = piece.rotated();
        assert_eq!((turned.width(), turned.height()), (1, 3));
        assert_eq!(
            turned.offsets(),
            &[Position::new(0, 0), Position::new(1, 0), Position::new(2, 0)]
        );
        assert_eq!(turned.id(), piece.id());
        assert_eq!(turned.kind(), ShapeKind::I3);
    }

    #[test]
    fn test_four_rotations_restore_cells() {
        let piece = Piece::new(PieceId::new(1), ShapeKind::L4, Color::Blue);
        let back = piece.rotated().rotated().rotated().rotated();
        let mut a = piece.offsets().to_vec();
        let mut b = back.offsets().to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }
}
