//! Gem cascade.
//!
//! Every cleared cell drops a small gem of a random color. Gems of one
//! color that touch orthogonally merge into a single larger gem, and the
//! largest gem on the board sets the score multiplier for the next move.
//!
//! ## Key Types
//!
//! - `Gem`: a gem with its color, position and tier
//! - `GemSize`: small/medium/large/mega, carrying 1×/2×/3×/5×
//! - `Cascade`: the result of one drop-merge pass

pub mod cascade;
pub mod gem;

pub use cascade::{
    active_multiplier, centroid, cluster, gems_on_board, generate_gems, place_gems, remove_gems,
    run_cascade, Cascade,
};
pub use gem::{Gem, GemId, GemSize, MAX_MULTIPLIER};
