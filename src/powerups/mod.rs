//! Power-ups.
//!
//! Five single-use abilities the player can spend between placements:
//! Reroll, Blast, Freeze, Target and Color Bomb.
//!
//! ## Key Types
//!
//! - `PowerUpKind`: the catalog of kinds with display text
//! - `PowerUps`: the player's loadout and remaining uses
//! - `PowerUpResolver`: applies a power-up and reports a `PowerUpOutcome`

pub mod definition;
pub mod resolver;
pub mod target;

pub use definition::{PowerUp, PowerUpKind, PowerUps};
pub use resolver::{PowerUpContext, PowerUpOutcome, PowerUpResolver, PowerUpTarget};
pub use target::{placement_score, suggest_placement};
