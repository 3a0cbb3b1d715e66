//! # block-merge-engine
//!
//! Deterministic game-state engine for a block-placement puzzle with a gem
//! cascade.
//!
//! Players place polyomino pieces on a square grid. Completed rows and
//! columns clear, every cleared cell drops a colored gem, touching gems of
//! one color merge into larger gems, and the largest gem sets the score
//! multiplier for the next clear.
//!
//! ## Design Principles
//!
//! 1. **Immutable Boards**: Every board operation returns a new `Board`.
//!    Cells live in an `im::Vector`, so copies share structure.
//!
//! 2. **Fair Tournaments**: Daily tournament pieces come from a published
//!    Park-Miller recurrence keyed by the calendar date, so every client
//!    deals the same sequence.
//!
//! 3. **Lossless Replays**: The compact replay form renames fields and
//!    drops none; decoding an encoded replay gives back the same replay.
//!
//! ## Modules
//!
//! - `core`: Positions, configuration, errors, RNG, clock
//! - `catalog`: Shapes and the color palette
//! - `board`: Cells, pieces, placement and line clears
//! - `generator`: Seeded piece batches and tournament dates
//! - `gems`: Gem drop, clustering and the multiplier
//! - `powerups`: Reroll, Blast, Freeze, Target, Color Bomb
//! - `replay`: Move recording and the compact codec
//! - `session`: The full move pipeline

pub mod core;
pub mod catalog;
pub mod board;
pub mod generator;
pub mod gems;
pub mod powerups;
pub mod replay;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Clock, ManualClock, SystemClock,
    EngineConfig, PowerUpGrant,
    CatalogError, CodecError, ConfigError, DateError, PlacementError,
    Position,
    GameRng,
};

pub use crate::catalog::{shapes, Color, ShapeCatalog, ShapeDef, ShapeKind};

pub use crate::board::{Board, CellState, CompleteLines, LineClear, Piece, PieceId};

pub use crate::generator::{daily_seed, PieceDealer, SeededRandom, TournamentDate};

pub use crate::gems::{active_multiplier, cluster, Cascade, Gem, GemId, GemSize};

pub use crate::powerups::{
    PowerUp, PowerUpKind, PowerUps,
    PowerUpContext, PowerUpOutcome, PowerUpResolver, PowerUpTarget,
};

pub use crate::replay::{
    CompactMove, CompactReplay,
    Replay, ReplayCode, ReplayId, ReplayMode, ReplayMove,
    RecorderState, ReplayMetadata, ReplayRecorder,
    ReplayStats,
};

pub use crate::session::{GameSession, MoveOutcome, SessionSummary};
