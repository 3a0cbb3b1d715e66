//! Power-up kinds, individual power-ups and the player's loadout.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{CatalogError, PowerUpGrant};

/// The five power-up kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PowerUpKind {
    Reroll,
    Blast,
    Freeze,
    Target,
    ColorBomb,
}

impl PowerUpKind {
    /// Every kind, in catalog order.
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Reroll,
        PowerUpKind::Blast,
        PowerUpKind::Freeze,
        PowerUpKind::Target,
        PowerUpKind::ColorBomb,
    ];

    /// Stored identifier, as used in configs and reward grants.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            PowerUpKind::Reroll => "reroll",
            PowerUpKind::Blast => "blast",
            PowerUpKind::Freeze => "freeze",
            PowerUpKind::Target => "target",
            PowerUpKind::ColorBomb => "colorBomb",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            PowerUpKind::Reroll => "Reroll",
            PowerUpKind::Blast => "Blast",
            PowerUpKind::Freeze => "Freeze",
            PowerUpKind::Target => "Target",
            PowerUpKind::ColorBomb => "Color Bomb",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            PowerUpKind::Reroll => "Swap one piece for a different shape",
            PowerUpKind::Blast => "Clear a 3x3 area on the board",
            PowerUpKind::Freeze => "Pause the timer for 30 seconds",
            PowerUpKind::Target => "AI suggests the best placement",
            PowerUpKind::ColorBomb => "Clear all blocks of one color",
        }
    }

    /// Resolve a stored id, panicking on an unknown one.
    ///
    /// Use for ids that come from the engine's own data.
    #[must_use]
    pub fn from_id_unchecked(id: &str) -> Self {
        match id.parse() {
            Ok(kind) => kind,
            Err(err) => panic!("{err}"),
        }
    }
}

impl std::fmt::Display for PowerUpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for PowerUpKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|k| k.id() == s)
            .ok_or_else(|| CatalogError::UnknownPowerUp(s.to_string()))
    }
}

/// One power-up slot with its remaining uses.
///
/// An exhausted power-up stays in the loadout and is simply inert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUp {
    kind: PowerUpKind,
    uses_remaining: u32,
}

impl PowerUp {
    #[must_use]
    pub const fn new(kind: PowerUpKind, uses: u32) -> Self {
        Self {
            kind,
            uses_remaining: uses,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> PowerUpKind {
        self.kind
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[must_use]
    pub const fn description(&self) -> &'static str {
        self.kind.description()
    }

    #[must_use]
    pub const fn uses_remaining(&self) -> u32 {
        self.uses_remaining
    }

    #[must_use]
    pub const fn can_use(&self) -> bool {
        self.uses_remaining > 0
    }

    /// Spend one use. Returns false (and changes nothing) when exhausted.
    pub fn consume(&mut self) -> bool {
        if self.can_use() {
            self.uses_remaining -= 1;
            true
        } else {
            false
        }
    }

    /// Add uses, saturating.
    pub fn grant(&mut self, uses: u32) {
        self.uses_remaining = self.uses_remaining.saturating_add(uses);
    }
}

/// The player's power-ups, one slot per kind, in the order first granted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUps {
    slots: Vec<PowerUp>,
}

impl PowerUps {
    /// An empty loadout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A loadout built from config grants. Repeated kinds accumulate.
    #[must_use]
    pub fn from_grants(grants: &[PowerUpGrant]) -> Self {
        let mut loadout = Self::new();
        for grant in grants {
            loadout.grant(grant.kind, grant.uses);
        }
        loadout
    }

    /// Add uses of `kind`, creating its slot if needed.
    pub fn grant(&mut self, kind: PowerUpKind, uses: u32) {
        match self.get_mut(kind) {
            Some(slot) => slot.grant(uses),
            None => self.slots.push(PowerUp::new(kind, uses)),
        }
    }

    #[must_use]
    pub fn get(&self, kind: PowerUpKind) -> Option<&PowerUp> {
        self.slots.iter().find(|p| p.kind == kind)
    }

    fn get_mut(&mut self, kind: PowerUpKind) -> Option<&mut PowerUp> {
        self.slots.iter_mut().find(|p| p.kind == kind)
    }

    /// Remaining uses of `kind`; zero if it was never granted.
    #[must_use]
    pub fn uses(&self, kind: PowerUpKind) -> u32 {
        self.get(kind).map_or(0, PowerUp::uses_remaining)
    }

    #[must_use]
    pub fn can_use(&self, kind: PowerUpKind) -> bool {
        self.uses(kind) > 0
    }

    /// Spend one use of `kind`. False if absent or exhausted.
    pub fn consume(&mut self, kind: PowerUpKind) -> bool {
        self.get_mut(kind).is_some_and(PowerUp::consume)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerUp> {
        self.slots.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
