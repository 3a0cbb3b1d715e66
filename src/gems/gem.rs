//! Gems and their size tiers.

use serde::{Deserialize, Serialize};

use crate::catalog::Color;
use crate::core::Position;

/// Highest multiplier any gem can carry.
pub const MAX_MULTIPLIER: u32 = 5;

/// Gem identity.
///
/// Derived from the cell the gem was dropped on, so the same board always
/// yields the same ids. A merged gem keeps the id of the gem its cluster
/// search started from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GemId(pub u32);

impl GemId {
    /// Id for a gem dropped at `pos`.
    #[must_use]
    pub const fn at(pos: Position) -> Self {
        Self(((pos.row as u32 & 0xFFFF) << 16) | (pos.col as u32 & 0xFFFF))
    }
}

impl std::fmt::Display for GemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gem-{}-{}", self.0 >> 16, self.0 & 0xFFFF)
    }
}

/// Size tier of a gem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GemSize {
    Small,
    Medium,
    Large,
    Mega,
}

impl GemSize {
    /// Tier for a cluster of `count` gems.
    #[must_use]
    pub const fn for_cluster(count: usize) -> Self {
        match count {
            0..=2 => GemSize::Small,
            3 => GemSize::Medium,
            4 => GemSize::Large,
            _ => GemSize::Mega,
        }
    }

    /// Score multiplier carried by this tier.
    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            GemSize::Small => 1,
            GemSize::Medium => 2,
            GemSize::Large => 3,
            GemSize::Mega => MAX_MULTIPLIER,
        }
    }
}

/// A gem on (or derived from) the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gem {
    pub id: GemId,
    pub color: Color,
    pub position: Position,
    pub size: GemSize,
    pub multiplier: u32,
}

impl Gem {
    /// A fresh small gem at `position`.
    #[must_use]
    pub const fn small(color: Color, position: Position) -> Self {
        Self::sized(GemId::at(position), color, position, GemSize::Small)
    }

    /// A gem of the given tier; the multiplier follows the tier.
    #[must_use]
    pub const fn sized(id: GemId, color: Color, position: Position, size: GemSize) -> Self {
        Self {
            id,
            color,
            position,
            size,
            multiplier: size.multiplier(),
        }
    }
}
