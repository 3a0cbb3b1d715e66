//! Replay data: the finalized record of one session.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::PieceId;
use crate::catalog::ShapeKind;
use crate::core::{CodecError, GameRng, Position};
use crate::generator::TournamentDate;

const CODE_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const CODE_DIGITS: &[u8; 10] = b"0123456789";
const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_SUFFIX_LEN: usize = 7;

/// Session mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplayMode {
    Endless,
    Tournament,
}

impl ReplayMode {
    /// Single-letter tag used by the compact encoding.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            ReplayMode::Endless => "e",
            ReplayMode::Tournament => "t",
        }
    }

    /// Inverse of [`tag`](Self::tag).
    pub fn from_tag(tag: &str) -> Result<Self, CodecError> {
        match tag {
            "e" => Ok(ReplayMode::Endless),
            "t" => Ok(ReplayMode::Tournament),
            other => Err(CodecError::InvalidMode(other.to_string())),
        }
    }
}

/// Unique replay identifier, `replay_{unix_ms}_{7 base36 chars}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplayId(pub String);

impl ReplayId {
    /// A fresh id stamped with `now_ms`.
    pub fn generate(now_ms: u64, rng: &mut GameRng) -> Self {
        let suffix: String = (0..ID_SUFFIX_LEN)
            .map(|_| char::from(BASE36[rng.gen_index(BASE36.len())]))
            .collect();
        Self(format!("replay_{now_ms}_{suffix}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReplayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Human-typeable share code: three uppercase letters then three digits.
///
/// Codes are not checked for uniqueness; collision handling belongs to
/// whatever stores replays by code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ReplayCode(String);

impl ReplayCode {
    /// Draw a code uniformly.
    pub fn generate(rng: &mut GameRng) -> Self {
        let mut code = String::with_capacity(6);
        for _ in 0..3 {
            code.push(char::from(CODE_LETTERS[rng.gen_index(CODE_LETTERS.len())]));
        }
        for _ in 0..3 {
            code.push(char::from(CODE_DIGITS[rng.gen_index(CODE_DIGITS.len())]));
        }
        Self(code)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn is_well_formed(code: &str) -> bool {
        let bytes = code.as_bytes();
        bytes.len() == 6
            && bytes[..3].iter().all(u8::is_ascii_uppercase)
            && bytes[3..].iter().all(u8::is_ascii_digit)
    }
}

impl FromStr for ReplayCode {
    type Err = CodecError;

    /// Parse a typed code. Case and surrounding whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_uppercase();
        if Self::is_well_formed(&code) {
            Ok(Self(code))
        } else {
            Err(CodecError::InvalidCode(s.to_string()))
        }
    }
}

impl TryFrom<String> for ReplayCode {
    type Error = CodecError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<ReplayCode> for String {
    fn from(code: ReplayCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for ReplayCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One recorded placement.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayMove {
    /// Milliseconds since recording started. Strictly increasing.
    pub timestamp_ms: u64,

    pub piece_id: PieceId,

    pub shape: ShapeKind,

    /// Anchor the piece was placed at.
    pub position: Position,

    /// Cumulative score after the move.
    pub score: u64,

    /// Rows plus columns completed by the move.
    pub lines_cleared: u32,

    /// Multiplier in force after the move's cascade.
    pub multiplier: u32,
}

/// A finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replay {
    pub id: ReplayId,
    pub code: Option<ReplayCode>,
    pub user_id: String,
    pub mode: ReplayMode,
    pub tournament_date: Option<TournamentDate>,
    pub seed: Option<u32>,

    pub final_score: u64,
    pub moves: Vec<ReplayMove>,
    pub duration_ms: u64,
    pub max_multiplier: u32,
    pub move_count: usize,

    /// Unix milliseconds.
    pub started_at: u64,
    /// Unix milliseconds.
    pub created_at: u64,

    pub display_name: Option<String>,
    pub rank: Option<u32>,
}

impl Replay {
    #[must_use]
    pub fn is_tournament(&self) -> bool {
        self.mode == ReplayMode::Tournament
    }

    /// Moves made up to `elapsed_ms` into the session.
    pub fn moves_until(&self, elapsed_ms: u64) -> impl Iterator<Item = &ReplayMove> {
        self.moves
            .iter()
            .take_while(move |m| m.timestamp_ms <= elapsed_ms)
    }
}
