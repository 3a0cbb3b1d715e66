//! Error types.
//!
//! Expected gameplay conditions (an occupied target, an exhausted power-up,
//! a Target scan that finds nothing) are not errors; they come back as
//! `bool`, `Option` or an outcome enum. The types here cover the fallible
//! entry points and data that arrives from outside the engine.

use thiserror::Error;

/// Why a piece could not be placed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The selected index is not in the active piece set.
    #[error("no piece at index {index} (active set holds {available})")]
    NoSuchPiece { index: usize, available: usize },

    /// A piece cell would land outside the board.
    #[error("cell ({row}, {col}) is outside the {size}x{size} board")]
    OutOfBounds { row: i32, col: i32, size: usize },

    /// A piece cell would land on an occupied block.
    #[error("cell ({row}, {col}) is already occupied")]
    Overlap { row: i32, col: i32 },

    /// The session has no valid moves left.
    #[error("the session is over")]
    GameOver,
}

/// An identifier that does not name a catalog entry.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown shape type: {0}")]
    UnknownShape(String),

    #[error("unknown color: {0}")]
    UnknownColor(String),

    #[error("unknown power-up type: {0}")]
    UnknownPowerUp(String),
}

/// Failure to decode a stored or shared replay.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("replay json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("replay bytes: {0}")]
    Binary(#[from] bincode::Error),

    #[error("unknown replay mode tag: {0:?}")]
    InvalidMode(String),

    #[error("malformed replay code: {0:?}")]
    InvalidCode(String),
}

/// Rejected engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "board size {0} is outside the supported range {}..={}",
        super::config::MIN_BOARD_SIZE,
        super::config::MAX_BOARD_SIZE
    )]
    UnsupportedBoardSize(usize),

    #[error("piece batch size must be at least 1")]
    EmptyBatch,

    #[error("config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Malformed `YYYY-MM-DD` tournament date.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("invalid tournament date: {0:?}")]
pub struct DateError(pub String);
