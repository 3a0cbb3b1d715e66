//! Summary figures for a finished replay.

use super::record::Replay;

const MS_PER_MINUTE: f64 = 60_000.0;

/// Pace and efficiency of a replay. All figures are 0 for an empty one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReplayStats {
    pub average_ms_per_move: f64,
    pub moves_per_minute: f64,
    pub points_per_move: f64,
}

impl ReplayStats {
    #[must_use]
    pub fn from_replay(replay: &Replay) -> Self {
        let moves = replay.move_count as f64;
        let duration = replay.duration_ms as f64;
        let per_move = |total: f64| if moves > 0.0 { total / moves } else { 0.0 };

        Self {
            average_ms_per_move: per_move(duration),
            moves_per_minute: if duration > 0.0 {
                moves / (duration / MS_PER_MINUTE)
            } else {
                0.0
            },
            points_per_move: per_move(replay.final_score as f64),
        }
    }
}

/// `"45s"` under a minute, `"2m 5s"` otherwise. Partial seconds drop.
#[must_use]
pub fn format_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let (minutes, seconds) = (total_seconds / 60, total_seconds % 60);
    if minutes == 0 {
        format!("{seconds}s")
    } else {
        format!("{minutes}m {seconds}s")
    }
}
