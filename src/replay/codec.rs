//! Compact replay encoding.
//!
//! The compact form renames every field to a short key and drops nothing,
//! so `decompress(compress(r)) == r` for every replay. It is the format
//! replays are stored and shared in, and its keys must stay stable:
//!
//! | key | field | key | move field |
//! |-----|-------|-----|------------|
//! | `i` | id | `t` | timestamp |
//! | `c` | code | `p` | piece id |
//! | `u` | user id | `st` | shape |
//! | `m` | mode (`"e"`/`"t"`) | `x` | column |
//! | `td` | tournament date | `y` | row |
//! | `s` | seed | `sc` | score |
//! | `fs` | final score | `lc` | lines cleared |
//! | `mv` | moves | `mp` | multiplier |
//! | `d` | duration | | |
//! | `mm` | max multiplier | | |
//! | `mc` | move count | | |
//! | `sa` | started at | | |
//! | `ca` | created at | | |
//! | `dn` | display name | | |
//! | `r` | rank | | |
//!
//! Absent optional fields are omitted from the JSON text. The binary form
//! carries no field names at all, so it encodes the [`Replay`] directly.

use serde::{Deserialize, Serialize};

use super::record::{Replay, ReplayCode, ReplayId, ReplayMode, ReplayMove};
use crate::board::PieceId;
use crate::catalog::ShapeKind;
use crate::core::{CodecError, Position};
use crate::generator::TournamentDate;

/// Short-key form of a [`ReplayMove`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactMove {
    pub t: u64,
    pub p: u64,
    pub st: ShapeKind,
    pub x: i32,
    pub y: i32,
    pub sc: u64,
    pub lc: u32,
    pub mp: u32,
}

/// Short-key form of a [`Replay`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactReplay {
    pub i: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub c: Option<ReplayCode>,
    pub u: String,
    pub m: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub td: Option<TournamentDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<u32>,
    pub fs: u64,
    pub mv: Vec<CompactMove>,
    pub d: u64,
    pub mm: u32,
    pub mc: usize,
    pub sa: u64,
    pub ca: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r: Option<u32>,
}

impl From<&ReplayMove> for CompactMove {
    fn from(m: &ReplayMove) -> Self {
        Self {
            t: m.timestamp_ms,
            p: m.piece_id.raw(),
            st: m.shape,
            x: m.position.col,
            y: m.position.row,
            sc: m.score,
            lc: m.lines_cleared,
            mp: m.multiplier,
        }
    }
}

impl From<CompactMove> for ReplayMove {
    fn from(m: CompactMove) -> Self {
        Self {
            timestamp_ms: m.t,
            piece_id: PieceId::new(m.p),
            shape: m.st,
            position: Position::new(m.y, m.x),
            score: m.sc,
            lines_cleared: m.lc,
            multiplier: m.mp,
        }
    }
}

/// Rename every field to its short key.
#[must_use]
pub fn compress(replay: &Replay) -> CompactReplay {
    CompactReplay {
        i: replay.id.0.clone(),
        c: replay.code.clone(),
        u: replay.user_id.clone(),
        m: replay.mode.tag().to_string(),
        td: replay.tournament_date,
        s: replay.seed,
        fs: replay.final_score,
        mv: replay.moves.iter().map(CompactMove::from).collect(),
        d: replay.duration_ms,
        mm: replay.max_multiplier,
        mc: replay.move_count,
        sa: replay.started_at,
        ca: replay.created_at,
        dn: replay.display_name.clone(),
        r: replay.rank,
    }
}

/// Expand a compact replay. Fails only on an unknown mode tag.
pub fn decompress(compact: CompactReplay) -> Result<Replay, CodecError> {
    Ok(Replay {
        id: ReplayId(compact.i),
        code: compact.c,
        user_id: compact.u,
        mode: ReplayMode::from_tag(&compact.m)?,
        tournament_date: compact.td,
        seed: compact.s,
        final_score: compact.fs,
        moves: compact.mv.into_iter().map(ReplayMove::from).collect(),
        duration_ms: compact.d,
        max_multiplier: compact.mm,
        move_count: compact.mc,
        started_at: compact.sa,
        created_at: compact.ca,
        display_name: compact.dn,
        rank: compact.r,
    })
}

/// Compact JSON text.
pub fn to_json(replay: &Replay) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&compress(replay))?)
}

/// Parse compact JSON text.
pub fn from_json(json: &str) -> Result<Replay, CodecError> {
    let compact: CompactReplay = serde_json::from_str(json)?;
    decompress(compact)
}

/// Binary encoding via bincode.
pub fn to_bytes(replay: &Replay) -> Result<Vec<u8>, CodecError> {
    Ok(bincode::serialize(replay)?)
}

/// Decode [`to_bytes`] output.
pub fn from_bytes(bytes: &[u8]) -> Result<Replay, CodecError> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Replay {
        Replay {
            id: ReplayId("replay_1_abcdefg".into()),
            code: Some("QRS456".parse().unwrap()),
            user_id: "u-9".into(),
            mode: ReplayMode::Tournament,
            tournament_date: Some(TournamentDate::new(2025, 6, 15).unwrap()),
            seed: Some(20_250_615),
            final_score: 240,
            moves: vec![
                ReplayMove {
                    timestamp_ms: 900,
                    piece_id: PieceId::new(0),
                    shape: ShapeKind::L3,
                    position: Position::new(5, 2),
                    score: 0,
                    lines_cleared: 0,
                    multiplier: 1,
                },
                ReplayMove {
                    timestamp_ms: 2_100,
                    piece_id: PieceId::new(1),
                    shape: ShapeKind::I5,
                    position: Position::new(7, 3),
                    score: 240,
                    lines_cleared: 3,
                    multiplier: 2,
                },
            ],
            duration_ms: 3_000,
            max_multiplier: 2,
            move_count: 2,
            started_at: 1_750_000_000_000,
            created_at: 1_750_000_003_000,
            display_name: None,
            rank: Some(4),
        }
    }

    #[test]
    fn test_x_is_column_y_is_row() {
        let compact = compress(&sample());
        assert_eq!((compact.mv[0].x, compact.mv[0].y), (2, 5));
        assert_eq!(compact.m, "t");
    }

    #[test]
    fn test_round_trip() {
        let replay = sample();
        assert_eq!(decompress(compress(&replay)).unwrap(), replay);
    }

    #[test]
    fn test_json_uses_short_keys_and_omits_absent() {
        let json = to_json(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["m"], "t");
        assert_eq!(value["td"], "2025-06-15");
        assert_eq!(value["c"], "QRS456");
        assert_eq!(value["mv"][1]["st"], "I5");
        assert!(value.get("dn").is_none());
        assert!(value.get("displayName").is_none());
        assert_eq!(from_json(&json).unwrap(), sample());
    }

    #[test]
    fn test_bad_mode_tag() {
        let mut compact = compress(&sample());
        compact.m = "x".into();
        assert!(matches!(decompress(compact), Err(CodecError::InvalidMode(_))));
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut replay = sample();
        replay.code = None;
        replay.display_name = Some("Grace".into());
        let bytes = to_bytes(&replay).unwrap();
        assert_eq!(from_bytes(&bytes).unwrap(), replay);
        assert!(matches!(from_bytes(&bytes[..3]), Err(CodecError::Binary(_))));
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(from_json("{"), Err(CodecError::Json(_))));
    }
}
