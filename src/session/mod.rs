//! Session orchestration.
//!
//! `GameSession` runs the full move pipeline: validate and place, clear
//! lines, drop and merge gems, score, record, refill. Power-ups enter
//! through [`GameSession::activate`].

pub mod game;
pub mod outcome;

pub use game::GameSession;
pub use outcome::{MoveOutcome, SessionSummary};
