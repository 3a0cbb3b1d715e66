//! The N×N board and its placement and line-clear rules.
//!
//! Every mutating operation returns a new `Board`; the receiver is left
//! untouched. Cells live in an `im::Vector`, so the copy shares structure
//! with the original and costs O(log n) per changed cell.
//!
//! Coordinates are `(row, col)`, row-major, `(0, 0)` top-left.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::cell::CellState;
use super::piece::Piece;
use crate::catalog::Color;
use crate::core::{PlacementError, Position};

/// Rows and columns that are completely filled with blocks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompleteLines {
    pub rows: Vec<usize>,
    pub cols: Vec<usize>,
}

impl CompleteLines {
    /// Total lines (rows plus columns).
    #[must_use]
    pub fn count(&self) -> usize {
        self.rows.len() + self.cols.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.cols.is_empty()
    }
}

/// Result of [`Board::clear_lines`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LineClear {
    /// The board after clearing.
    pub board: Board,
    /// Cleared positions: complete rows row-major, then complete columns
    /// column-major, each position once.
    pub cleared_cells: Vec<Position>,
    /// Which lines were complete.
    pub lines: CompleteLines,
}

/// Square game board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vector<CellState>,
}

impl Board {
    /// Create an empty `size`×`size` board.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero. Session configs are validated to
    /// [`MIN_BOARD_SIZE`](crate::core::config::MIN_BOARD_SIZE) and up before a board is built.
    #[must_use]
    pub fn create_empty(size: usize) -> Self {
        assert!(size > 0, "Board must have at least one cell");
        Self {
            size,
            cells: std::iter::repeat(CellState::Empty)
                .take(size * size)
                .collect(),
        }
    }

    /// Build a board from text rows (see [`CellState::to_char`]).
    ///
    /// Returns `None` if the rows are not square or contain an unknown
    /// character.
    #[must_use]
    pub fn from_ascii(rows: &[&str]) -> Option<Self> {
        let size = rows.len();
        if size == 0 {
            return None;
        }
        let mut cells = Vector::new();
        for row in rows {
            let chars: Vec<char> = row.chars().filter(|c| !c.is_whitespace()).collect();
            if chars.len() != size {
                return None;
            }
            for ch in chars {
                cells.push_back(CellState::from_char(ch)?);
            }
        }
        Some(Self { size, cells })
    }

    /// Edge length.
    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let n = self.size as i32;
        if row < 0 || col < 0 || row >= n || col >= n {
            return None;
        }
        Some(row as usize * self.size + col as usize)
    }

    /// True if `(row, col)` lies on the board.
    #[must_use]
    pub fn in_bounds(&self, row: i32, col: i32) -> bool {
        self.index(row, col).is_some()
    }

    /// Cell at `(row, col)`, `None` when out of bounds.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<CellState> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Cell at a position, `None` when out of bounds.
    #[must_use]
    pub fn at(&self, pos: Position) -> Option<CellState> {
        self.get(pos.row, pos.col)
    }

    /// True if `(row, col)` holds a block.
    #[must_use]
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some_and(CellState::is_occupied)
    }

    /// Copy of this board with the given cells replaced.
    ///
    /// Out-of-bounds positions are skipped.
    #[must_use]
    pub fn with_cells<I>(&self, updates: I) -> Self
    where
        I: IntoIterator<Item = (Position, CellState)>,
    {
        let mut cells = self.cells.clone();
        for (pos, state) in updates {
            if let Some(i) = self.index(pos.row, pos.col) {
                cells.set(i, state);
            }
        }
        Self {
            size: self.size,
            cells,
        }
    }

    /// Every cell with its position, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (Position, CellState)> + '_ {
        let n = self.size;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, c)| (Position::new((i / n) as i32, (i % n) as i32), *c))
    }

    // === Placement ===

    /// Check whether `piece` fits with its anchor at `(row, col)`.
    ///
    /// Every piece cell must be on the board and not hold a block. Gem
    /// cells count as free.
    #[must_use]
    pub fn can_place(&self, piece: &Piece, row: i32, col: i32) -> bool {
        self.check_placement(piece, row, col).is_ok()
    }

    /// Like [`can_place`](Self::can_place) but reports the first offending
    /// cell.
    pub fn check_placement(&self, piece: &Piece, row: i32, col: i32) -> Result<(), PlacementError> {
        for cell in piece.cells_at(row, col) {
            match self.at(cell) {
                None => {
                    return Err(PlacementError::OutOfBounds {
                        row: cell.row,
                        col: cell.col,
                        size: self.size,
                    })
                }
                Some(state) if state.is_occupied() => {
                    return Err(PlacementError::Overlap {
                        row: cell.row,
                        col: cell.col,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Place `piece` without checking. Callers must have validated with
    /// [`can_place`](Self::can_place); prefer [`try_place`](Self::try_place).
    ///
    /// Cells that fall off the board are dropped.
    #[must_use]
    pub fn place(&self, piece: &Piece, row: i32, col: i32) -> Self {
        let block = CellState::Occupied(piece.color());
        self.with_cells(piece.cells_at(row, col).map(|p| (p, block)))
    }

    /// Validate and place in one step.
    pub fn try_place(&self, piece: &Piece, row: i32, col: i32) -> Result<Self, PlacementError> {
        self.check_placement(piece, row, col)?;
        Ok(self.place(piece, row, col))
    }

    /// Every valid anchor for `piece`, row-major.
    #[must_use]
    pub fn valid_placements(&self, piece: &Piece) -> Vec<Position> {
        let n = self.size as i32;
        let mut out = Vec::new();
        for row in 0..n {
            for col in 0..n {
                if self.can_place(piece, row, col) {
                    out.push(Position::new(row, col));
                }
            }
        }
        out
    }

    /// True if any piece has at least one valid placement.
    #[must_use]
    pub fn has_valid_moves(&self, pieces: &[Piece]) -> bool {
        let n = self.size as i32;
        pieces.iter().any(|piece| {
            (0..n).any(|row| (0..n).any(|col| self.can_place(piece, row, col)))
        })
    }

    // === Lines ===

    fn row_complete(&self, row: usize) -> bool {
        let start = row * self.size;
        (start..start + self.size).all(|i| self.cells[i].is_occupied())
    }

    fn col_complete(&self, col: usize) -> bool {
        (0..self.size).all(|row| self.cells[row * self.size + col].is_occupied())
    }

    /// Rows and columns filled entirely with blocks.
    #[must_use]
    pub fn find_complete_lines(&self) -> CompleteLines {
        CompleteLines {
            rows: (0..self.size).filter(|r| self.row_complete(*r)).collect(),
            cols: (0..self.size).filter(|c| self.col_complete(*c)).collect(),
        }
    }

    /// Empty every complete row and column.
    #[must_use]
    pub fn clear_lines(&self) -> LineClear {
        let lines = self.find_complete_lines();
        if lines.is_empty() {
            return LineClear {
                board: self.clone(),
                cleared_cells: Vec::new(),
                lines,
            };
        }

        let n = self.size as i32;
        let mut seen = FxHashSet::default();
        let mut cleared_cells = Vec::new();

        for &row in &lines.rows {
            for col in 0..n {
                let pos = Position::new(row as i32, col);
                if seen.insert(pos) {
                    cleared_cells.push(pos);
                }
            }
        }
        for &col in &lines.cols {
            for row in 0..n {
                let pos = Position::new(row, col as i32);
                if seen.insert(pos) {
                    cleared_cells.push(pos);
                }
            }
        }

        let board = self.with_cells(cleared_cells.iter().map(|p| (*p, CellState::Empty)));
        LineClear {
            board,
            cleared_cells,
            lines,
        }
    }

    /// Empty every block cell matching `pred`, returning the cleared
    /// positions row-major. Gem cells are never touched.
    #[must_use]
    pub fn clear_blocks_where<F>(&self, mut pred: F) -> (Self, Vec<Position>)
    where
        F: FnMut(Position, Color) -> bool,
    {
        let cleared: Vec<Position> = self
            .iter()
            .filter_map(|(pos, cell)| cell.block_color().filter(|c| pred(pos, *c)).map(|_| pos))
            .collect();
        let board = self.with_cells(cleared.iter().map(|p| (*p, CellState::Empty)));
        (board, cleared)
    }

    // === Queries ===

    /// Number of block cells.
    #[must_use]
    pub fn count_occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_occupied()).count()
    }

    /// Distinct block colors present, in palette order.
    #[must_use]
    pub fn occupied_colors(&self) -> Vec<Color> {
        let mut present = [false; Color::ALL.len()];
        for cell in self.cells.iter() {
            if let Some(c) = cell.block_color() {
                present[c.index()] = true;
            }
        }
        Color::ALL
            .iter()
            .copied()
            .filter(|c| present[c.index()])
            .collect()
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", self.cells[row * self.size + col].to_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::PieceId;
    use crate::catalog::ShapeKind;

    fn piece(kind: ShapeKind) -> Piece {
        Piece::new(PieceId::new(0), kind, Color::Red)
    }

    #[test]
    fn test_create_empty() {
        let board = Board::create_empty(8);
        assert_eq!(board.size(), 8);
        assert_eq!(board.count_occupied(), 0);
        assert!(board.iter().all(|(_, c)| c == CellState::Empty));
    }

    #[test]
    #[should_panic(expected = "at least one cell")]
    fn test_create_empty_zero_size_panics() {
        let _ = Board::create_empty(0);
    }

    #[test]
    fn test_bounds() {
        let board = Board::create_empty(8);
        assert!(board.in_bounds(0, 0));
        assert!(board.in_bounds(7, 7));
        assert!(!board.in_bounds(-1, 0));
        assert!(!board.in_bounds(0, 8));
        assert_eq!(board.get(8, 8), None);
    }

    #[test]
    fn test_place_does_not_mutate_original() {
        let board = Board::create_empty(8);
        let placed = board.place(&piece(ShapeKind::O2x2), 0, 0);

        assert_eq!(board.count_occupied(), 0);
        assert_eq!(placed.count_occupied(), 4);
        assert_eq!(placed.get(1, 1), Some(CellState::Occupied(Color::Red)));
    }

    #[test]
    fn test_can_place_rejects_out_of_bounds() {
        let board = Board::create_empty(8);
        let line = piece(ShapeKind::I5);
        assert!(board.can_place(&line, 0, 3));
        assert!(!board.can_place(&line, 0, 4));
        assert!(!board.can_place(&line, -1, 0));
        assert_eq!(
            board.check_placement(&line, 0, 4),
            Err(PlacementError::OutOfBounds { row: 0, col: 8, size: 8 })
        );
    }

    #[test]
    fn test_can_place_rejects_overlap() {
        let board = Board::create_empty(8).place(&piece(ShapeKind::I2), 3, 3);
        assert!(!board.can_place(&piece(ShapeKind::I2), 3, 2));
        assert_eq!(
            board.check_placement(&piece(ShapeKind::I2), 3, 4),
            Err(PlacementError::Overlap { row: 3, col: 4 })
        );
    }

    #[test]
    fn test_gem_cells_accept_blocks() {
        let board = Board::create_empty(8)
            .with_cells([(Position::new(0, 0), CellState::Gem(Color::Blue))]);
        let single = piece(ShapeKind::I2);
        assert!(board.can_place(&single, 0, 0));

        let placed = board.try_place(&single, 0, 0).unwrap();
        assert_eq!(placed.get(0, 0), Some(CellState::Occupied(Color::Red)));
    }

    #[test]
    fn test_row_and_column_completion() {
        let board = Board::from_ascii(&[
            "RRRRR",
            "R....",
            "R....",
            "R....",
            "R....",
        ])
        .unwrap();
        let lines = board.find_complete_lines();
        assert_eq!(lines.rows, vec![0]);
        assert_eq!(lines.cols, vec![0]);
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn test_gems_do_not_complete_lines() {
        let board = Board::from_ascii(&[
            "RRRRr",
            ".....",
            ".....",
            ".....",
            ".....",
        ])
        .unwrap();
        assert!(board.find_complete_lines().is_empty());
    }

    #[test]
    fn test_clear_lines_order_and_dedup() {
        let board = Board::from_ascii(&[
            "BBBBB",
            "B....",
            "B....",
            "B....",
            "B....",
        ])
        .unwrap();
        let clear = board.clear_lines();

        // Row 0 first, then column 0 without repeating (0, 0).
        let expected: Vec<_> = (0..5)
            .map(|c| Position::new(0, c))
            .chain((1..5).map(|r| Position::new(r, 0)))
            .collect();
        assert_eq!(clear.cleared_cells, expected);
        assert_eq!(clear.board.count_occupied(), 0);
        assert_eq!(board.count_occupied(), 9);
    }

    #[test]
    fn test_clear_lines_noop_when_incomplete() {
        let board = Board::create_empty(8).place(&piece(ShapeKind::I5), 0, 0);
        let clear = board.clear_lines();
        assert!(clear.cleared_cells.is_empty());
        assert_eq!(clear.board, board);
    }

    #[test]
    fn test_has_valid_moves() {
        let full_but_one = Board::from_ascii(&[
            "RRRRR",
            "RRRRR",
            "RRRRR",
            "RRRRR",
            "RRRR.",
        ])
        .unwrap();
        assert!(!full_but_one.has_valid_moves(&[piece(ShapeKind::I2)]));
        assert!(!full_but_one.has_valid_moves(&[]));

        let open = Board::create_empty(5);
        assert!(open.has_valid_moves(&[piece(ShapeKind::O3x3)]));
    }

    #[test]
    fn test_valid_placements_row_major() {
        let board = Board::create_empty(5);
        let placements = board.valid_placements(&piece(ShapeKind::I5));
        assert_eq!(placements.len(), 5);
        assert_eq!(placements[0], Position::new(0, 0));
        assert_eq!(placements[4], Position::new(4, 0));
    }

    #[test]
    fn test_occupied_colors_in_palette_order() {
        let board = Board::from_ascii(&[
            "O.B..",
            ".....",
            "..r..",
            ".....",
            "....B",
        ])
        .unwrap();
        assert_eq!(board.occupied_colors(), vec![Color::Blue, Color::Orange]);
    }

    #[test]
    fn test_clear_blocks_where_skips_gems() {
        let board = Board::from_ascii(&[
            "Rr...",
            ".R...",
            ".....",
            ".....",
            ".....",
        ])
        .unwrap();
        let (cleared, cells) = board.clear_blocks_where(|_, c| c == Color::Red);
        assert_eq!(cells, vec![Position::new(0, 0), Position::new(1, 1)]);
        assert_eq!(cleared.get(0, 1), Some(CellState::Gem(Color::Red)));
    }

    #[test]
    fn test_display_round_trip() {
        let rows = ["R.b..", ".....", "..G..", ".....", "....o"];
        let board = Board::from_ascii(&rows).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines, rows);
    }

    #[test]
    fn test_from_ascii_rejects_ragged() {
        assert!(Board::from_ascii(&["..", "."]).is_none());
        assert!(Board::from_ascii(&["x."]).is_none());
        assert!(Board::from_ascii(&[]).is_none());
    }
}
