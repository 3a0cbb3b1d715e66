//! Core engine types: coordinates, configuration, errors, RNG, clock.
//!
//! Everything here is game-agnostic plumbing shared by the board, the
//! cascade, the power-ups and the replay recorder.

pub mod clock;
pub mod config;
pub mod error;
pub mod position;
pub mod rng;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{EngineConfig, PowerUpGrant};
pub use error::{CatalogError, CodecError, ConfigError, DateError, PlacementError};
pub use position::Position;
pub use rng::GameRng;
