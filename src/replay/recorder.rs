//! Move recording.
//!
//! `ReplayRecorder` is a three-state machine:
//!
//! ```text
//! Idle --start()--> Recording --stop()--> Stopped
//!   ^                   |
//!   +----cancel()-------+
//! ```
//!
//! Moves are accepted only while recording. `stop()` moves the buffer into
//! an immutable [`Replay`]; a second `stop()` yields nothing.

use tracing::{debug, trace};

use super::record::{Replay, ReplayCode, ReplayId, ReplayMode, ReplayMove};
use crate::board::Piece;
use crate::core::{Clock, GameRng, Position};
use crate::generator::TournamentDate;

/// Recorder state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecorderState {
    Idle,
    Recording,
    Stopped,
}

/// Who played, and what kind of session it was.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayMetadata {
    pub user_id: String,
    pub mode: ReplayMode,
    pub tournament_date: Option<TournamentDate>,
    pub seed: Option<u32>,
    pub display_name: Option<String>,
    pub rank: Option<u32>,
}

impl ReplayMetadata {
    /// Metadata for an endless session.
    pub fn endless(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            mode: ReplayMode::Endless,
            tournament_date: None,
            seed: None,
            display_name: None,
            rank: None,
        }
    }

    /// Metadata for the tournament held on `date`.
    pub fn tournament(user_id: impl Into<String>, date: TournamentDate) -> Self {
        Self {
            user_id: user_id.into(),
            mode: ReplayMode::Tournament,
            tournament_date: Some(date),
            seed: Some(date.seed()),
            display_name: None,
            rank: None,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }
}

/// Records the moves of one session.
pub struct ReplayRecorder {
    meta: ReplayMetadata,
    id: ReplayId,
    state: RecorderState,
    clock: Box<dyn Clock>,
    rng: GameRng,

    moves: Vec<ReplayMove>,
    started_at: u64,
    current_score: u64,
    max_multiplier: u32,
}

impl ReplayRecorder {
    /// Create an idle recorder. `rng` supplies the replay id and share code.
    pub fn new(meta: ReplayMetadata, clock: Box<dyn Clock>, mut rng: GameRng) -> Self {
        let id = ReplayId::generate(clock.now_ms(), &mut rng);
        Self {
            meta,
            id,
            state: RecorderState::Idle,
            clock,
            rng,
            moves: Vec::new(),
            started_at: 0,
            current_score: 0,
            max_multiplier: 1,
        }
    }

    #[must_use]
    pub fn state(&self) -> RecorderState {
        self.state
    }

    #[must_use]
    pub fn replay_id(&self) -> &ReplayId {
        &self.id
    }

    #[must_use]
    pub fn metadata(&self) -> &ReplayMetadata {
        &self.meta
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        self.state == RecorderState::Recording
    }

    /// Moves in the current buffer.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    /// Time since `start()`, or 0 when not recording.
    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        if self.is_recording() {
            self.clock.now_ms().saturating_sub(self.started_at)
        } else {
            0
        }
    }

    /// Begin recording, discarding any previous buffer.
    ///
    /// Restarting a stopped recorder gives the next replay a fresh id.
    pub fn start(&mut self) {
        if self.state == RecorderState::Stopped {
            self.id = ReplayId::generate(self.clock.now_ms(), &mut self.rng);
        }
        self.state = RecorderState::Recording;
        self.started_at = self.clock.now_ms();
        self.moves.clear();
        self.current_score = 0;
        self.max_multiplier = 1;
        debug!(replay = %self.id, mode = ?self.meta.mode, "replay recording started");
    }

    /// Append a move. Ignored (returns false) unless recording.
    ///
    /// Timestamps are kept strictly increasing: if the clock has not moved
    /// past the previous move, the new move is stamped one millisecond
    /// later.
    pub fn record_move(
        &mut self,
        piece: &Piece,
        position: Position,
        score: u64,
        lines_cleared: u32,
        multiplier: u32,
    ) -> bool {
        if !self.is_recording() {
            return false;
        }

        let mut timestamp_ms = self.clock.now_ms().saturating_sub(self.started_at);
        if let Some(last) = self.moves.last() {
            if timestamp_ms <= last.timestamp_ms {
                timestamp_ms = last.timestamp_ms + 1;
            }
        }

        self.moves.push(ReplayMove {
            timestamp_ms,
            piece_id: piece.id(),
            shape: piece.kind(),
            position,
            score,
            lines_cleared,
            multiplier,
        });
        self.current_score = score;
        self.max_multiplier = self.max_multiplier.max(multiplier);
        trace!(
            move_index = self.moves.len() - 1,
            timestamp_ms,
            score,
            multiplier,
            "move recorded"
        );
        true
    }

    /// Finish recording and hand back the replay.
    ///
    /// `final_score` defaults to the last recorded score. Returns `None`
    /// unless currently recording.
    pub fn stop(&mut self, final_score: Option<u64>) -> Option<Replay> {
        if !self.is_recording() {
            return None;
        }
        self.state = RecorderState::Stopped;

        let now = self.clock.now_ms();
        let moves = std::mem::take(&mut self.moves);
        let replay = Replay {
            id: self.id.clone(),
            code: Some(ReplayCode::generate(&mut self.rng)),
            user_id: self.meta.user_id.clone(),
            mode: self.meta.mode,
            tournament_date: self.meta.tournament_date,
            seed: self.meta.seed,
            final_score: final_score.unwrap_or(self.current_score),
            move_count: moves.len(),
            moves,
            duration_ms: now.saturating_sub(self.started_at),
            max_multiplier: self.max_multiplier,
            started_at: self.started_at,
            created_at: now,
            display_name: self.meta.display_name.clone(),
            rank: self.meta.rank,
        };

        debug!(
            replay = %replay.id,
            code = ?replay.code,
            moves = replay.move_count,
            duration_ms = replay.duration_ms,
            "replay recording stopped"
        );
        Some(replay)
    }

    /// Drop the buffer without producing a replay.
    pub fn cancel(&mut self) {
        self.state = RecorderState::Idle;
        self.moves.clear();
        debug!(replay = %self.id, "replay recording cancelled");
    }
}

impl std::fmt::Debug for ReplayRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReplayRecorder")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("moves", &self.moves.len())
            .finish_non_exhaustive()
    }
}
