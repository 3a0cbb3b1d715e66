//! What a session reports back to its host.

use serde::{Deserialize, Serialize};

use crate::board::CompleteLines;
use crate::core::Position;
use crate::gems::Gem;

/// Result of one successful placement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Points earned by this move.
    pub score_delta: u64,

    /// Cumulative score after the move.
    pub score: u64,

    /// Rows and columns completed by the move.
    pub lines: CompleteLines,

    /// Cells emptied by the clear, in clear order.
    pub cleared_cells: Vec<Position>,

    /// Gems dropped by the clear.
    pub dropped_gems: Vec<Gem>,

    /// Highest merged gem above small, if the clear produced one.
    pub best_merge: Option<Gem>,

    /// Multiplier for the next move.
    pub multiplier: u32,

    /// A new batch was dealt because the last piece was used.
    pub refilled: bool,

    /// No piece in the active set fits anywhere.
    pub game_over: bool,
}

impl MoveOutcome {
    /// Rows plus columns completed.
    #[must_use]
    pub fn lines_cleared(&self) -> u32 {
        self.lines.count() as u32
    }
}

/// End-of-session figures for reward and leaderboard collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub final_score: u64,
    pub max_multiplier: u32,
    pub move_count: usize,
    pub duration_ms: u64,
}
