//! Power-up resolution.
//!
//! `PowerUpResolver` applies a power-up against a read-only view of the
//! session and reports what happened as a `PowerUpOutcome`. The caller owns
//! the state and applies the outcome; the resolver never mutates anything
//! but the loadout.
//!
//! A use is consumed only when the activation takes effect. An exhausted
//! power-up, a missing target, or a Target scan that finds nothing leaves
//! the loadout untouched.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::definition::{PowerUpKind, PowerUps};
use super::target::suggest_placement;
use crate::board::{Board, Piece};
use crate::catalog::Color;
use crate::core::Position;

/// What a power-up is aimed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpTarget {
    /// No target (Freeze).
    None,
    /// An index into the active piece set (Reroll, Target).
    Piece(usize),
    /// A board cell (Blast centre).
    Cell(Position),
    /// A palette color (Color Bomb).
    Color(Color),
}

/// Result of activating a power-up.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PowerUpOutcome {
    /// Blocks were removed. `score` is awarded at multiplier 1.
    Cleared {
        board: Board,
        cells: Vec<Position>,
        score: u64,
    },
    /// The piece at `index` should be replaced by `piece`.
    Rerolled { index: usize, piece: Piece },
    /// Suggested anchor for the piece at `index`.
    Suggested { index: usize, position: Position },
    /// The timer should pause for `duration_ms`.
    Frozen { duration_ms: u64 },
    /// Target found no valid placement. No use consumed.
    NoSuggestion,
    /// The power-up is absent or exhausted. No use consumed.
    Inert,
    /// The target does not suit this power-up. No use consumed.
    Invalid(String),
}

impl PowerUpOutcome {
    /// True when a use was spent.
    #[must_use]
    pub fn consumed_use(&self) -> bool {
        matches!(
            self,
            PowerUpOutcome::Cleared { .. }
                | PowerUpOutcome::Rerolled { .. }
                | PowerUpOutcome::Suggested { .. }
                | PowerUpOutcome::Frozen { .. }
        )
    }
}

/// Read-only view of the session a power-up acts on.
///
/// Reroll draws its replacement through `reroll`, which the session wires
/// to its dealer and effect RNG.
pub struct PowerUpContext<'a> {
    pub board: &'a Board,
    pub pieces: &'a [Piece],
    pub line_clear_points: u64,
    pub freeze_duration_ms: u64,
    reroll: Box<dyn FnMut() -> Piece + 'a>,
}

impl<'a> PowerUpContext<'a> {
    /// Create a context with the piece source used by Reroll.
    pub fn new(
        board: &'a Board,
        pieces: &'a [Piece],
        reroll: impl FnMut() -> Piece + 'a,
    ) -> Self {
        Self {
            board,
            pieces,
            line_clear_points: crate::core::config::DEFAULT_LINE_CLEAR_POINTS,
            freeze_duration_ms: crate::core::config::DEFAULT_FREEZE_DURATION_MS,
            reroll: Box::new(reroll),
        }
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
}

/// Applies power-ups.
pub struct PowerUpResolver;

impl PowerUpResolver {
    /// Activate `kind` against `target`, spending one use on success.
    pub fn activate(
        loadout: &mut PowerUps,
        kind: PowerUpKind,
        target: PowerUpTarget,
        ctx: &mut PowerUpContext<'_>,
    ) -> PowerUpOutcome {
        if !loadout.can_use(kind) {
            debug!(power_up = %kind, "power-up inert");
            return PowerUpOutcome::Inert;
        }

        let outcome = Self::resolve(kind, target, ctx);
        if outcome.consumed_use() {
            loadout.consume(kind);
        }
        debug!(
            power_up = %kind,
            consumed = outcome.consumed_use(),
            remaining = loadout.uses(kind),
            "power-up activated"
        );
        outcome
    }

    fn resolve(
        kind: PowerUpKind,
        target: PowerUpTarget,
        ctx: &mut PowerUpContext<'_>,
    ) -> PowerUpOutcome {
        match (kind, target) {
            (PowerUpKind::Reroll, PowerUpTarget::Piece(index)) => {
                if index >= ctx.pieces.len() {
                    return invalid_piece(index, ctx.pieces.len());
                }
                PowerUpOutcome::Rerolled {
                    index,
                    piece: (ctx.reroll)(),
                }
            }
            (PowerUpKind::Blast, PowerUpTarget::Cell(center)) => {
                match Self::blast(ctx.board, center) {
                    Some((board, cells)) => cleared(board, cells, ctx.line_clear_points),
                    None => PowerUpOutcome::Invalid(format!("blast centre {center} is off the board")),
                }
            }
            (PowerUpKind::ColorBomb, PowerUpTarget::Color(color)) => {
                let (board, cells) = Self::color_bomb(ctx.board, color);
                cleared(board, cells, ctx.line_clear_points)
            }
            (PowerUpKind::Target, PowerUpTarget::Piece(index)) => {
                let Some(piece) = ctx.pieces.get(index) else {
                    return invalid_piece(index, ctx.pieces.len());
                };
                match suggest_placement(ctx.board, piece) {
                    Some(position) => PowerUpOutcome::Suggested { index, position },
                    None => PowerUpOutcome::NoSuggestion,
                }
            }
            (PowerUpKind::Freeze, _) => PowerUpOutcome::Frozen {
                duration_ms: ctx.freeze_duration_ms,
            },
            (kind, target) => {
                PowerUpOutcome::Invalid(format!("{kind} cannot target {target:?}"))
            }
        }
    }

    /// Clear every block in the 3×3 square centred on `center`, clipped to
    /// the board. `None` if the centre itself is off the board.
    #[must_use]
    pub fn blast(board: &Board, center: Position) -> Option<(Board, Vec<Position>)> {
        if !board.in_bounds(center.row, center.col) {
            return None;
        }
        Some(board.clear_blocks_where(|pos, _| {
            (pos.row - center.row).abs() <= 1 && (pos.col - center.col).abs() <= 1
        }))
    }

    /// Clear every block of `color`.
    #[must_use]
    pub fn color_bomb(board: &Board, color: Color) -> (Board, Vec<Position>) {
        board.clear_blocks_where(|_, c| c == color)
    }
}

fn cleared(board: Board, cells: Vec<Position>, points: u64) -> PowerUpOutcome {
    let score = cells.len() as u64 * points;
    PowerUpOutcome::Cleared { board, cells, score }
}

fn invalid_piece(index: usize, available: usize) -> PowerUpOutcome {
    PowerUpOutcome::Invalid(format!(
        "no piece at index {index} (active set holds {available})"
    ))
}
