//! Board engine integration tests.
//!
//! Placement validity, line clears and the immutability of boards, plus
//! property tests over random placement sequences.

use block_merge::board::{Board, CellState, Piece, PieceId};
use block_merge::catalog::{Color, ShapeKind};
use block_merge::core::{PlacementError, Position};
use proptest::prelude::*;

fn piece(id: u64, kind: ShapeKind, color: Color) -> Piece {
    Piece::new(PieceId::new(id), kind, color)
}

// ============================================================================
// Scenarios
// ============================================================================

/// Filling the last gap of row 7 clears exactly that row.
///
/// Columns 0-2 hold blocks in rows 0-5 and 7 only, so none of them is
/// complete when row 7 closes.
#[test]
fn test_row_seven_clears_without_columns() {
    let mut board = Board::create_empty(8);
    for row in 0..6 {
        board = board
            .try_place(&piece(row as u64, ShapeKind::I3, Color::Red), row, 0)
            .unwrap();
    }
    board = board
        .try_place(&piece(10, ShapeKind::I5, Color::Blue), 7, 3)
        .unwrap();
    assert!(board.find_complete_lines().is_empty());

    let board = board
        .try_place(&piece(11, ShapeKind::I3, Color::Green), 7, 0)
        .unwrap();
    let clear = board.clear_lines();

    assert_eq!(clear.lines.rows, vec![7]);
    assert!(clear.lines.cols.is_empty());
    assert_eq!(clear.cleared_cells.len(), 8);
    assert_eq!(
        clear.cleared_cells,
        (0..8).map(|c| Position::new(7, c)).collect::<Vec<_>>()
    );
    // 8 cells at 10 points each, multiplier 1.
    assert_eq!(clear.cleared_cells.len() as u64 * 10, 80);

    // Rows 0-5 survive.
    assert_eq!(clear.board.count_occupied(), 18);
    for col in 0..8 {
        assert_eq!(clear.board.get(7, col), Some(CellState::Empty));
    }
}

/// A row and a column sharing a cell clear that cell once.
#[test]
fn test_cross_clear_dedups_shared_cell() {
    let rows = [
        "....R",
        "....R",
        "RRRRR",
        "....R",
        "....R",
    ];
    let board = Board::from_ascii(&rows).unwrap();
    let clear = board.clear_lines();

    assert_eq!(clear.lines.rows, vec![2]);
    assert_eq!(clear.lines.cols, vec![4]);
    assert_eq!(clear.cleared_cells.len(), 9);
    assert_eq!(clear.board.count_occupied(), 0);
}

/// Placement reports the first failing cell.
#[test]
fn test_placement_errors_name_the_cell() {
    let board = Board::from_ascii(&[".....", "..B..", ".....", ".....", "....."]).unwrap();

    assert_eq!(
        board.try_place(&piece(0, ShapeKind::I3, Color::Red), 1, 0),
        Err(PlacementError::Overlap { row: 1, col: 2 })
    );
    assert_eq!(
        board.try_place(&piece(0, ShapeKind::I3, Color::Red), 0, 3),
        Err(PlacementError::OutOfBounds { row: 0, col: 5, size: 5 })
    );
}

/// A full 10x10 board is supported.
#[test]
fn test_ten_by_ten_board() {
    let board = Board::create_empty(10);
    let i5 = piece(0, ShapeKind::I5, Color::Yellow);
    let board = board.try_place(&i5, 9, 0).unwrap().try_place(&i5, 9, 5).unwrap();
    let clear = board.clear_lines();
    assert_eq!(clear.lines.rows, vec![9]);
    assert_eq!(clear.cleared_cells.len(), 10);
}

/// Rotating four times returns the original footprint.
#[test]
fn test_rotation_cycles() {
    for kind in ShapeKind::ALL {
        let p = piece(0, kind, Color::Red);
        let back = p.rotated().rotated().rotated().rotated();
        let mut a: Vec<_> = p.offsets().to_vec();
        let mut b: Vec<_> = back.offsets().to_vec();
        a.sort();
        b.sort();
        assert_eq!(a, b, "{kind}");
        assert_eq!(p.rotated().width(), p.height());
    }
}

// ============================================================================
// Properties
// ============================================================================

fn arb_piece() -> impl Strategy<Value = Piece> {
    (0..ShapeKind::ALL.len(), 0..Color::ALL.len()).prop_map(|(s, c)| {
        piece(0, ShapeKind::ALL[s], Color::ALL[c])
    })
}

fn arb_moves() -> impl Strategy<Value = Vec<(Piece, i32, i32)>> {
    prop::collection::vec((arb_piece(), -2i32..10, -2i32..10), 1..40)
}

proptest! {
    /// A placement succeeds iff every cell is on the board and block-free,
    /// and it changes exactly the piece's cells.
    #[test]
    fn prop_placement_soundness(moves in arb_moves()) {
        let mut board = Board::create_empty(8);
        for (p, row, col) in moves {
            let cells: Vec<Position> = p.cells_at(row, col).collect();
            let expected_ok = cells
                .iter()
                .all(|c| board.at(*c).is_some_and(|s| !s.is_occupied()));

            prop_assert_eq!(board.can_place(&p, row, col), expected_ok);
            match board.try_place(&p, row, col) {
                Ok(next) => {
                    prop_assert!(expected_ok);
                    for (pos, cell) in next.iter() {
                        if cells.contains(&pos) {
                            prop_assert_eq!(cell, CellState::Occupied(p.color()));
                        } else {
                            prop_assert_eq!(Some(cell), board.at(pos));
                        }
                    }
                    board = next.clear_lines().board;
                }
                Err(_) => prop_assert!(!expected_ok),
            }
        }
    }

    /// A cell is cleared iff it lay on a row or column that was full.
    #[test]
    fn prop_clear_correctness(moves in arb_moves()) {
        let mut board = Board::create_empty(6);
        for (p, row, col) in moves {
            if let Ok(placed) = board.try_place(&p, row, col) {
                let clear = placed.clear_lines();
                for (pos, before) in placed.iter() {
                    let full_row = (0..6).all(|c| placed.is_occupied(pos.row, c));
                    let full_col = (0..6).all(|r| placed.is_occupied(r, pos.col));
                    let cleared = clear.cleared_cells.contains(&pos);

                    prop_assert_eq!(cleared, full_row || full_col);
                    if cleared {
                        prop_assert_eq!(clear.board.at(pos), Some(CellState::Empty));
                    } else {
                        prop_assert_eq!(clear.board.at(pos), Some(before));
                    }
                }
                board = clear.board;
            }
        }
    }
}
