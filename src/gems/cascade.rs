//! The cascade: cleared cells drop gems, same-color neighbours merge, and
//! the biggest gem on the board sets the score multiplier.
//!
//! Board gem cells are the durable state. Merged gems are a derived view,
//! recomputed from the board after every clear; they are never written
//! back, so a centroid that lands on a block cannot overwrite it.
//! Collapsing merged gems onto their centroid cells would be the simpler
//! model; keeping each dropped gem on the board instead is deliberate.

use std::collections::VecDeque;

use rustc_hash::FxHashMap;

use super::gem::{Gem, GemSize};
use crate::board::{Board, CellState};
use crate::catalog::Color;
use crate::core::{GameRng, Position};

/// One small gem per cleared cell, each color uniform over the palette.
pub fn generate_gems(cleared_cells: &[Position], rng: &mut GameRng) -> Vec<Gem> {
    cleared_cells
        .iter()
        .map(|pos| {
            let color = Color::ALL[rng.gen_index(Color::ALL.len())];
            Gem::small(color, *pos)
        })
        .collect()
}

/// Write each gem's color into its cell.
///
/// Gems off the board or on a block cell are skipped.
#[must_use]
pub fn place_gems(board: &Board, gems: &[Gem]) -> Board {
    let updates: Vec<_> = gems
        .iter()
        .filter(|g| board.at(g.position).is_some_and(CellState::is_free))
        .map(|g| (g.position, CellState::Gem(g.color)))
        .collect();
    board.with_cells(updates)
}

/// Small gems for every gem cell on the board, row-major.
#[must_use]
pub fn gems_on_board(board: &Board) -> Vec<Gem> {
    board
        .iter()
        .filter_map(|(pos, cell)| cell.gem_color().map(|c| Gem::small(c, pos)))
        .collect()
}

/// Turn gem cells back into empty cells. Block cells are left alone.
#[must_use]
pub fn remove_gems(board: &Board, positions: &[Position]) -> Board {
    let updates: Vec<_> = positions
        .iter()
        .filter(|p| board.at(**p).is_some_and(CellState::is_gem))
        .map(|p| (*p, CellState::Empty))
        .collect();
    board.with_cells(updates)
}

/// Merge 4-connected same-color gems.
///
/// Clusters are found breadth-first, starting from each not-yet-visited gem
/// in input order, so the output order follows the input. A lone gem is
/// returned unchanged. A cluster of two or more becomes one gem at the
/// rounded centroid, sized by cluster cardinality, keeping the id of the
/// gem the search started from.
#[must_use]
pub fn cluster(gems: &[Gem]) -> Vec<Gem> {
    let mut by_position: FxHashMap<Position, Vec<usize>> = FxHashMap::default();
    for (i, gem) in gems.iter().enumerate() {
        by_position.entry(gem.position).or_default().push(i);
    }

    let mut visited = vec![false; gems.len()];
    let mut merged = Vec::new();
    let mut queue = VecDeque::new();

    for (start, seed) in gems.iter().enumerate() {
        if visited[start] {
            continue;
        }
        visited[start] = true;
        queue.push_back(start);

        let mut members = Vec::new();
        while let Some(current) = queue.pop_front() {
            members.push(current);
            for neighbour in gems[current].position.neighbours() {
                let Some(candidates) = by_position.get(&neighbour) else {
                    continue;
                };
                for &i in candidates {
                    if !visited[i] && gems[i].color == seed.color {
                        visited[i] = true;
                        queue.push_back(i);
                    }
                }
            }
        }

        if members.len() == 1 {
            merged.push(*seed);
        } else {
            let positions: Vec<Position> = members.iter().map(|&i| gems[i].position).collect();
            merged.push(Gem::sized(
                seed.id,
                seed.color,
                centroid(&positions),
                GemSize::for_cluster(members.len()),
            ));
        }
    }

    merged
}

/// Mean position, each axis rounded half up.
#[must_use]
pub fn centroid(positions: &[Position]) -> Position {
    let n = positions.len() as i64;
    if n == 0 {
        return Position::new(0, 0);
    }
    let rows: i64 = positions.iter().map(|p| i64::from(p.row)).sum();
    let cols: i64 = positions.iter().map(|p| i64::from(p.col)).sum();
    Position::new(round_half_up(rows, n), round_half_up(cols, n))
}

// floor(sum / n + 1/2) in exact integer arithmetic.
fn round_half_up(sum: i64, n: i64) -> i32 {
    (2 * sum + n).div_euclid(2 * n) as i32
}

/// The largest multiplier among `gems`, or 1 when there are none.
#[must_use]
pub fn active_multiplier(gems: &[Gem]) -> u32 {
    gems.iter().map(|g| g.multiplier).max().unwrap_or(1)
}

/// Everything one cascade pass produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cascade {
    /// Board with the new gems in place.
    pub board: Board,
    /// Gems dropped by this clear.
    pub dropped: Vec<Gem>,
    /// Merged view of every gem on the board.
    pub merged: Vec<Gem>,
    /// Multiplier for the next move.
    pub multiplier: u32,
}

impl Cascade {
    /// The highest-tier merged gem above small, if any.
    ///
    /// Ties go to the earliest gem in merge order.
    #[must_use]
    pub fn best_merge(&self) -> Option<&Gem> {
        self.merged
            .iter()
            .filter(|g| g.size > GemSize::Small)
            .fold(None, |best: Option<&Gem>, g| match best {
                Some(b) if b.size >= g.size => Some(b),
                _ => Some(g),
            })
    }
}

/// Run the full cascade on a board whose lines were just cleared.
pub fn run_cascade(cleared_board: &Board, cleared_cells: &[Position], rng: &mut GameRng) -> Cascade {
    let dropped = generate_gems(cleared_cells, rng);
    let board = place_gems(cleared_board, &dropped);
    let merged = cluster(&gems_on_board(&board));
    let multiplier = active_multiplier(&merged);
    Cascade {
        board,
        dropped,
        merged,
        multiplier,
    }
}
