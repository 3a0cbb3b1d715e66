//! Board engine: cells, pieces, placement and line clearing.
//!
//! ## Key Types
//!
//! - `CellState`: `Empty | Occupied(color) | Gem(color)`
//! - `Piece`: an immutable colored catalog shape
//! - `Board`: the N×N grid; every operation returns a new board

pub mod cell;
pub mod grid;
pub mod piece;

pub use cell::CellState;
pub use grid::{Board, CompleteLines, LineClear};
pub use piece::{Piece, PieceId};
