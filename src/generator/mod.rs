//! Piece generation.
//!
//! - `SeededRandom`: the Park-Miller generator behind tournament fairness
//! - `PieceDealer`: batch dealing for casual and tournament sessions
//! - `TournamentDate`: calendar date to seed mapping

pub mod dealer;
pub mod seeded;
pub mod tournament;

pub use dealer::{batch_seed, random_shape_and_color, tournament_batch, PieceDealer, BATCH_SEED_STRIDE};
pub use seeded::SeededRandom;
pub use tournament::{daily_seed, format_time_remaining, TournamentDate, TOURNAMENT_TIME_LIMIT_MS};
