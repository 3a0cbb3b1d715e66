//! Engine configuration.
//!
//! Hosts configure a session at startup by providing an `EngineConfig`:
//! - board size and piece batch size
//! - scoring constants
//! - the starting power-up loadout
//! - whether effect randomness (gem colors, rerolls) follows the
//!   tournament seed
//!
//! The config is plain serde data so a host can ship it as JSON.

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::powerups::PowerUpKind;

/// Default board edge length.
pub const DEFAULT_BOARD_SIZE: usize = 8;

/// Smallest board that fits every catalog shape (I5 is five cells long).
pub const MIN_BOARD_SIZE: usize = 5;

/// Largest supported board.
pub const MAX_BOARD_SIZE: usize = 16;

/// Pieces dealt per batch.
pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Points per cleared cell before the multiplier.
pub const DEFAULT_LINE_CLEAR_POINTS: u64 = 10;

/// Timer pause granted by Freeze.
pub const DEFAULT_FREEZE_DURATION_MS: u64 = 30_000;

/// A number of uses of one power-up kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpGrant {
    pub kind: PowerUpKind,
    pub uses: u32,
}

impl PowerUpGrant {
    #[must_use]
    pub const fn new(kind: PowerUpKind, uses: u32) -> Self {
        Self { kind, uses }
    }
}

/// Complete engine configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Board edge length (N for an N×N grid).
    pub board_size: usize,

    /// Pieces dealt each time the active set runs out.
    pub batch_size: usize,

    /// Points per cleared cell, multiplied by the active multiplier.
    pub line_clear_points: u64,

    /// How long a Freeze pauses the tournament timer.
    pub freeze_duration_ms: u64,

    /// Power-ups available at session start.
    pub starting_power_ups: Vec<PowerUpGrant>,

    /// Derive gem-color and reroll randomness from the tournament seed.
    ///
    /// Off by default: tournament fairness covers the dealt pieces only.
    pub seeded_effects: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            board_size: DEFAULT_BOARD_SIZE,
            batch_size: DEFAULT_BATCH_SIZE,
            line_clear_points: DEFAULT_LINE_CLEAR_POINTS,
            freeze_duration_ms: DEFAULT_FREEZE_DURATION_MS,
            starting_power_ups: vec![
                PowerUpGrant::new(PowerUpKind::Reroll, 1),
                PowerUpGrant::new(PowerUpKind::Blast, 1),
            ],
            seeded_effects: false,
        }
    }
}

impl EngineConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the board edge length.
    #[must_use]
    pub fn with_board_size(mut self, size: usize) -> Self {
        self.board_size = size;
        self
    }

    /// Set the number of pieces per batch.
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Set points per cleared cell.
    #[must_use]
    pub fn with_line_clear_points(mut self, points: u64) -> Self {
        self.line_clear_points = points;
        self
    }

    /// Set the Freeze pause length.
    #[must_use]
    pub fn with_freeze_duration_ms(mut self, ms: u64) -> Self {
        self.freeze_duration_ms = ms;
        self
    }

    /// Replace the starting loadout.
    #[must_use]
    pub fn with_power_ups(mut self, grants: Vec<PowerUpGrant>) -> Self {
        self.starting_power_ups = grants;
        self
    }

    /// Add one grant to the starting loadout.
    #[must_use]
    pub fn with_power_up(mut self, kind: PowerUpKind, uses: u32) -> Self {
        self.starting_power_ups.push(PowerUpGrant::new(kind, uses));
        self
    }

    /// Seed gem colors and rerolls from the tournament seed.
    #[must_use]
    pub fn with_seeded_effects(mut self, seeded: bool) -> Self {
        self.seeded_effects = seeded;
        self
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            return Err(ConfigError::UnsupportedBoardSize(self.board_size));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.board_size, 8);
        assert_eq!(config.batch_size, 3);
        assert_eq!(config.line_clear_points, 10);
        assert_eq!(config.freeze_duration_ms, 30_000);
        assert_eq!(
            config.starting_power_ups,
            vec![
                PowerUpGrant::new(PowerUpKind::Reroll, 1),
                PowerUpGrant::new(PowerUpKind::Blast, 1),
            ]
        );
        assert!(!config.seeded_effects);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EngineConfig::new()
            .with_board_size(10)
            .with_batch_size(4)
            .with_power_ups(Vec::new())
            .with_power_up(PowerUpKind::Target, 2)
            .with_seeded_effects(true);

        assert_eq!(config.board_size, 10);
        assert_eq!(config.batch_size, 4);
        assert_eq!(config.starting_power_ups.len(), 1);
        assert!(config.seeded_effects);
    }

    #[test]
    fn test_validate_rejects_bad_sizes() {
        assert!(matches!(
            EngineConfig::new().with_board_size(4).validate(),
            Err(ConfigError::UnsupportedBoardSize(4))
        ));
        assert!(matches!(
            EngineConfig::new().with_board_size(17).validate(),
            Err(ConfigError::UnsupportedBoardSize(17))
        ));
        assert!(matches!(
            EngineConfig::new().with_batch_size(0).validate(),
            Err(ConfigError::EmptyBatch)
        ));
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = EngineConfig::from_json(r#"{ "board_size": 10 }"#).unwrap();
        assert_eq!(config.board_size, 10);
        assert_eq!(config.batch_size, 3);

        let config = EngineConfig::from_json(
            r#"{ "starting_power_ups": [ { "kind": "colorBomb", "uses": 3 } ] }"#,
        )
        .unwrap();
        assert_eq!(
            config.starting_power_ups,
            vec![PowerUpGrant::new(PowerUpKind::ColorBomb, 3)]
        );
    }

    #[test]
    fn test_from_json_rejects_invalid() {
        assert!(matches!(
            EngineConfig::from_json(r#"{ "board_size": 2 }"#),
            Err(ConfigError::UnsupportedBoardSize(2))
        ));
        assert!(matches!(
            EngineConfig::from_json("not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
