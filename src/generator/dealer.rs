//! Piece batches.
//!
//! Two sources:
//!
//! - **Tournament**: batch `k` is drawn from a fresh [`SeededRandom`] seeded
//!   with `seed + k * 1000`. Each piece draws its shape index, then its
//!   color index. The whole sequence follows from the tournament seed.
//! - **Casual**: shapes and colors drawn from a [`GameRng`] stream.
//!
//! Piece ids are allocated by the dealer and are unique within a session.

use tracing::trace;

use super::seeded::SeededRandom;
use crate::board::{Piece, PieceId};
use crate::catalog::{Color, ShapeKind};
use crate::core::GameRng;

/// Seed offset between consecutive tournament batches.
pub const BATCH_SEED_STRIDE: i64 = 1000;

/// Seed of tournament batch `batch_index`.
#[must_use]
pub fn batch_seed(seed: u32, batch_index: u32) -> i64 {
    i64::from(seed) + i64::from(batch_index) * BATCH_SEED_STRIDE
}

/// The `(shape, color)` sequence of one tournament batch.
#[must_use]
pub fn tournament_batch(seed: u32, batch_index: u32, count: usize) -> Vec<(ShapeKind, Color)> {
    let mut rng = SeededRandom::new(batch_seed(seed, batch_index));
    (0..count)
        .map(|_| {
            let shape = ShapeKind::ALL[rng.next_index(ShapeKind::ALL.len())];
            let color = Color::ALL[rng.next_index(Color::ALL.len())];
            (shape, color)
        })
        .collect()
}

/// A catalog-uniform shape and palette-uniform color.
pub fn random_shape_and_color(rng: &mut GameRng) -> (ShapeKind, Color) {
    let shape = ShapeKind::ALL[rng.gen_index(ShapeKind::ALL.len())];
    let color = Color::ALL[rng.gen_index(Color::ALL.len())];
    (shape, color)
}

#[derive(Clone, Debug)]
enum Source {
    Casual(GameRng),
    Tournament { seed: u32 },
}

/// Deals successive piece batches for one session.
#[derive(Clone, Debug)]
pub struct PieceDealer {
    source: Source,
    batch_size: usize,
    batches_dealt: u32,
    next_id: u64,
}

impl PieceDealer {
    /// Casual dealer drawing from `rng`.
    #[must_use]
    pub fn casual(rng: GameRng, batch_size: usize) -> Self {
        Self {
            source: Source::Casual(rng),
            batch_size,
            batches_dealt: 0,
            next_id: 0,
        }
    }

    /// Tournament dealer keyed by `seed`.
    #[must_use]
    pub fn tournament(seed: u32, batch_size: usize) -> Self {
        Self {
            source: Source::Tournament { seed },
            batch_size,
            batches_dealt: 0,
            next_id: 0,
        }
    }

    /// Tournament seed, if this is a tournament dealer.
    #[must_use]
    pub fn seed(&self) -> Option<u32> {
        match self.source {
            Source::Tournament { seed } => Some(seed),
            Source::Casual(_) => None,
        }
    }

    /// Number of batches dealt so far (the next batch's index).
    #[must_use]
    pub fn batches_dealt(&self) -> u32 {
        self.batches_dealt
    }

    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    fn alloc_id(&mut self) -> PieceId {
        let id = PieceId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Deal the next batch.
    pub fn next_batch(&mut self) -> Vec<Piece> {
        let index = self.batches_dealt;
        let specs = match &mut self.source {
            Source::Tournament { seed } => tournament_batch(*seed, index, self.batch_size),
            Source::Casual(rng) => (0..self.batch_size)
                .map(|_| random_shape_and_color(rng))
                .collect(),
        };
        self.batches_dealt += 1;
        trace!(batch = index, pieces = specs.len(), "dealt piece batch");

        specs
            .into_iter()
            .map(|(shape, color)| {
                let id = self.alloc_id();
                Piece::new(id, shape, color)
            })
            .collect()
    }

    /// A single random piece outside the batch sequence (reroll).
    ///
    /// Drawn from `rng`, never from the tournament sequence, so rerolls do
    /// not shift later batches.
    pub fn random_piece(&mut self, rng: &mut GameRng) -> Piece {
        let (shape, color) = random_shape_and_color(rng);
        let id = self.alloc_id();
        Piece::new(id, shape, color)
    }
}
