//! Placement suggestion for the Target power-up.
//!
//! A greedy one-move heuristic: each valid anchor is scored by the lines
//! the placement would complete, with the piece's cell count as a small
//! tie-breaker. It does not look ahead and is not an optimal solver.

use crate::board::{Board, Piece};
use crate::core::Position;

/// Tenths of a point per completed row or column.
const LINE_WEIGHT: u32 = 100;

/// Tenths of a point per piece cell.
const CELL_WEIGHT: u32 = 1;

/// Score of placing `piece` at `anchor`, in tenths of a point:
/// `10 × completed lines + 0.1 × piece cells`.
///
/// `anchor` must be a valid placement.
#[must_use]
pub fn placement_score(board: &Board, piece: &Piece, anchor: Position) -> u32 {
    let lines = board.place(piece, anchor.row, anchor.col).find_complete_lines();
    lines.count() as u32 * LINE_WEIGHT + piece.size() as u32 * CELL_WEIGHT
}

/// The best placement for `piece`, or `None` if it fits nowhere.
///
/// Anchors are scanned row-major; the first highest score wins.
#[must_use]
pub fn suggest_placement(board: &Board, piece: &Piece) -> Option<Position> {
    let mut best: Option<(Position, u32)> = None;
    for anchor in board.valid_placements(piece) {
        let score = placement_score(board, piece, anchor);
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((anchor, score));
        }
    }
    best.map(|(pos, _)| pos)
}
