//! One play session, from the first batch to game over.

use tracing::{debug, trace};

use super::outcome::{MoveOutcome, SessionSummary};
use crate::board::{Board, Piece};
use crate::core::{Clock, ConfigError, EngineConfig, GameRng, PlacementError, Position, SystemClock};
use crate::gems::{run_cascade, Gem};
use crate::generator::{PieceDealer, TournamentDate};
use crate::powerups::{
    PowerUpContext, PowerUpKind, PowerUpOutcome, PowerUpResolver, PowerUpTarget, PowerUps,
};
use crate::replay::{Replay, ReplayMetadata, ReplayMode, ReplayRecorder};

/// A single endless or tournament session.
///
/// Owns the live board, the active piece set, the gem view and the replay
/// recorder. Recording starts when the session is created.
///
/// ```
/// use block_merge::core::EngineConfig;
/// use block_merge::generator::TournamentDate;
/// use block_merge::session::GameSession;
///
/// let date = TournamentDate::new(2025, 6, 15).unwrap();
/// let a = GameSession::tournament(EngineConfig::default(), "a", date).unwrap();
/// let b = GameSession::tournament(EngineConfig::default(), "b", date).unwrap();
///
/// // Every player gets the same pieces on the same day.
/// let kinds = |s: &GameSession| s.pieces().iter().map(|p| p.kind()).collect::<Vec<_>>();
/// assert_eq!(kinds(&a), kinds(&b));
/// ```
#[derive(Debug)]
pub struct GameSession {
    // === Configuration ===
    config: EngineConfig,
    mode: ReplayMode,
    tournament_date: Option<TournamentDate>,

    // === Play State ===
    board: Board,
    pieces: Vec<Piece>,
    gems: Vec<Gem>,
    power_ups: PowerUps,
    score: u64,
    multiplier: u32,
    max_multiplier: u32,
    move_count: usize,
    over: bool,
    pending_freeze_ms: Option<u64>,

    // === Sources ===
    dealer: PieceDealer,
    gem_rng: GameRng,
    reroll_rng: GameRng,
    recorder: ReplayRecorder,
}

impl GameSession {
    /// Endless session on the system clock with entropy-seeded randomness.
    pub fn endless(config: EngineConfig, user_id: impl Into<String>) -> Result<Self, ConfigError> {
        Self::with_clock(
            config,
            ReplayMetadata::endless(user_id),
            Box::new(SystemClock),
            GameRng::from_entropy(),
        )
    }

    /// Tournament session for `date` on the system clock.
    pub fn tournament(
        config: EngineConfig,
        user_id: impl Into<String>,
        date: TournamentDate,
    ) -> Result<Self, ConfigError> {
        Self::with_clock(
            config,
            ReplayMetadata::tournament(user_id, date),
            Box::new(SystemClock),
            GameRng::from_entropy(),
        )
    }

    /// Fully specified session.
    ///
    /// A tournament seed in `meta` fixes the piece sequence; `rng` drives
    /// everything else (casual pieces, gem colors, rerolls, replay code).
    /// With `seeded_effects` on, gem colors and rerolls follow the
    /// tournament seed too.
    pub fn with_clock(
        config: EngineConfig,
        meta: ReplayMetadata,
        clock: Box<dyn Clock>,
        mut rng: GameRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut dealer = match meta.seed {
            Some(seed) => PieceDealer::tournament(seed, config.batch_size),
            None => PieceDealer::casual(rng.fork(), config.batch_size),
        };

        let (gem_rng, reroll_rng) = match meta.seed {
            Some(seed) if config.seeded_effects => {
                let base = GameRng::new(u64::from(seed));
                (base.for_context("gems"), base.for_context("reroll"))
            }
            _ => (rng.fork(), rng.fork()),
        };

        let mode = meta.mode;
        let tournament_date = meta.tournament_date;
        let mut recorder = ReplayRecorder::new(meta, clock, rng.fork());
        recorder.start();

        let board = Board::create_empty(config.board_size);
        let pieces = dealer.next_batch();
        let over = !board.has_valid_moves(&pieces);

        debug!(
            ?mode,
            seed = ?dealer.seed(),
            rng_seed = rng.seed(),
            board_size = config.board_size,
            "session started"
        );

        Ok(Self {
            power_ups: PowerUps::from_grants(&config.starting_power_ups),
            config,
            mode,
            tournament_date,
            board,
            pieces,
            gems: Vec::new(),
            score: 0,
            multiplier: 1,
            max_multiplier: 1,
            move_count: 0,
            over,
            pending_freeze_ms: None,
            dealer,
            gem_rng,
            reroll_rng,
            recorder,
        })
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn mode(&self) -> ReplayMode {
        self.mode
    }

    #[must_use]
    pub fn tournament_date(&self) -> Option<TournamentDate> {
        self.tournament_date
    }

    /// Tournament seed, if this is a tournament session.
    #[must_use]
    pub fn seed(&self) -> Option<u32> {
        self.dealer.seed()
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The active, not yet placed pieces.
    #[must_use]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Merged gem view as of the last clear.
    #[must_use]
    pub fn gems(&self) -> &[Gem] {
        &self.gems
    }

    #[must_use]
    pub fn power_ups(&self) -> &PowerUps {
        &self.power_ups
    }

    #[must_use]
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Multiplier applied to the next clear.
    #[must_use]
    pub fn multiplier(&self) -> u32 {
        self.multiplier
    }

    #[must_use]
    pub fn max_multiplier(&self) -> u32 {
        self.max_multiplier
    }

    #[must_use]
    pub fn move_count(&self) -> usize {
        self.move_count
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn recorder(&self) -> &ReplayRecorder {
        &self.recorder
    }

    /// Collect a pending Freeze pause, clearing it.
    pub fn take_freeze(&mut self) -> Option<u64> {
        self.pending_freeze_ms.take()
    }

    /// Add power-up uses (rewards, shop grants).
    pub fn grant_power_up(&mut self, kind: PowerUpKind, uses: u32) {
        self.power_ups.grant(kind, uses);
    }

    // === Play ===

    /// Place the active piece at `index` with its anchor at `(row, col)`.
    ///
    /// Clears complete lines, runs the gem cascade, scores the clear with
    /// the multiplier in force before the move, records the move and deals
    /// a new batch once the active set is empty.
    pub fn place_piece(
        &mut self,
        index: usize,
        row: i32,
        col: i32,
    ) -> Result<MoveOutcome, PlacementError> {
        if self.over {
            return Err(PlacementError::GameOver);
        }
        let piece = self.pieces.get(index).ok_or(PlacementError::NoSuchPiece {
            index,
            available: self.pieces.len(),
        })?;

        let placed = self.board.try_place(piece, row, col)?;
        let clear = placed.clear_lines();

        let mut score_delta = 0;
        let mut dropped_gems = Vec::new();
        let mut best_merge = None;
        if clear.cleared_cells.is_empty() {
            self.board = placed;
        } else {
            score_delta = clear.cleared_cells.len() as u64
                * self.config.line_clear_points
                * u64::from(self.multiplier);

            let cascade = run_cascade(&clear.board, &clear.cleared_cells, &mut self.gem_rng);
            best_merge = cascade.best_merge().copied();
            self.board = cascade.board;
            self.gems = cascade.merged;
            self.multiplier = cascade.multiplier;
            dropped_gems = cascade.dropped;
        }

        self.score += score_delta;
        self.move_count += 1;
        self.max_multiplier = self.max_multiplier.max(self.multiplier);

        let piece = self.pieces.remove(index);
        self.recorder.record_move(
            &piece,
            Position::new(row, col),
            self.score,
            clear.lines.count() as u32,
            self.multiplier,
        );

        let refilled = self.pieces.is_empty();
        if refilled {
            self.pieces = self.dealer.next_batch();
        }
        self.over = !self.board.has_valid_moves(&self.pieces);

        trace!(
            piece = %piece.id(),
            row,
            col,
            score_delta,
            multiplier = self.multiplier,
            game_over = self.over,
            "piece placed"
        );
        if self.over {
            debug!(score = self.score, moves = self.move_count, "no valid moves left");
        }

        Ok(MoveOutcome {
            score_delta,
            score: self.score,
            lines: clear.lines,
            cleared_cells: clear.cleared_cells,
            dropped_gems,
            best_merge,
            multiplier: self.multiplier,
            refilled,
            game_over: self.over,
        })
    }

    /// Activate a power-up and apply its effect to the session.
    ///
    /// Nothing happens once the session is over.
    pub fn activate(&mut self, kind: PowerUpKind, target: PowerUpTarget) -> PowerUpOutcome {
        if self.over {
            return PowerUpOutcome::Inert;
        }

        let dealer = &mut self.dealer;
        let reroll_rng = &mut self.reroll_rng;
        let mut ctx = PowerUpContext::new(&self.board, &self.pieces, move || {
            dealer.random_piece(reroll_rng)
        })
        .with_line_clear_points(self.config.line_clear_points)
        .with_freeze_duration_ms(self.config.freeze_duration_ms);

        let outcome = PowerUpResolver::activate(&mut self.power_ups, kind, target, &mut ctx);
        drop(ctx);

        match &outcome {
            PowerUpOutcome::Cleared { board, score, .. } => {
                self.board = board.clone();
                self.score += score;
            }
            PowerUpOutcome::Rerolled { index, piece } => {
                self.pieces[*index] = piece.clone();
            }
            PowerUpOutcome::Frozen { duration_ms } => {
                self.pending_freeze_ms =
                    Some(self.pending_freeze_ms.unwrap_or(0) + duration_ms);
            }
            PowerUpOutcome::Suggested { .. }
            | PowerUpOutcome::NoSuggestion
            | PowerUpOutcome::Inert
            | PowerUpOutcome::Invalid(_) => {}
        }
        self.over = !self.board.has_valid_moves(&self.pieces);
        outcome
    }

    /// End the session and collect its replay.
    ///
    /// `final_score` overrides the session score (e.g. a server-verified
    /// total). The replay is `None` if recording already ended.
    pub fn finish(&mut self, final_score: Option<u64>) -> (SessionSummary, Option<Replay>) {
        self.over = true;
        let final_score = final_score.unwrap_or(self.score);
        let elapsed = self.recorder.elapsed_ms();
        let replay = self.recorder.stop(Some(final_score));

        let summary = SessionSummary {
            final_score,
            max_multiplier: self.max_multiplier,
            move_count: self.move_count,
            duration_ms: replay.as_ref().map_or(elapsed, |r| r.duration_ms),
        };
        debug!(
            final_score,
            moves = self.move_count,
            max_multiplier = self.max_multiplier,
            "session finished"
        );
        (summary, replay)
    }

    /// End the session without producing a replay.
    pub fn abandon(&mut self) {
        self.over = true;
        self.recorder.cancel();
        debug!(moves = self.move_count, "session abandoned");
    }
}
