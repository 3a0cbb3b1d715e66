//! Daily tournament metadata: calendar dates, seeds, the countdown.
//!
//! Every participant on the same calendar day receives the same seed, and
//! therefore the same ordered piece batches.

use std::str::FromStr;

use chrono::{DateTime, Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::core::DateError;

/// Length of a tournament round.
pub const TOURNAMENT_TIME_LIMIT_MS: u64 = 5 * 60 * 1000;

/// Earliest supported year.
pub const MIN_YEAR: i32 = 1;

/// Latest supported year. Keeps `year * 10000 + month * 100 + day` in `u32`
/// and the stored form at four year digits.
pub const MAX_YEAR: i32 = 9999;

/// A calendar date (proleptic Gregorian) in years `1..=9999`.
///
/// Stored and exchanged as `YYYY-MM-DD`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "NaiveDate", into = "NaiveDate")]
pub struct TournamentDate(NaiveDate);

impl TournamentDate {
    /// Validated constructor.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| DateError(format!("{year:04}-{month:02}-{day:02}")))
            .and_then(Self::try_from)
    }

    /// The UTC calendar date of a Unix timestamp in milliseconds.
    ///
    /// Fails for timestamps whose date falls outside `1..=9999`.
    pub fn from_unix_millis(ms: i64) -> Result<Self, DateError> {
        DateTime::from_timestamp_millis(ms)
            .ok_or_else(|| DateError(format!("unix millis {ms}")))
            .and_then(|dt| Self::try_from(dt.date_naive()))
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.0.year()
    }

    #[must_use]
    pub fn month(self) -> u32 {
        self.0.month()
    }

    #[must_use]
    pub fn day(self) -> u32 {
        self.0.day()
    }

    /// `year * 10000 + month * 100 + day`.
    #[must_use]
    pub fn seed(self) -> u32 {
        // Year is within MIN_YEAR..=MAX_YEAR, so this tops out at 99_991_231.
        self.0.year() as u32 * 10_000 + self.0.month() * 100 + self.0.day()
    }

    /// `tournament-YYYY-MM-DD`.
    #[must_use]
    pub fn tournament_id(self) -> String {
        format!("tournament-{self}")
    }
}

impl TryFrom<NaiveDate> for TournamentDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
            Ok(Self(date))
        } else {
            Err(DateError(date.to_string()))
        }
    }
}

impl From<TournamentDate> for NaiveDate {
    fn from(date: TournamentDate) -> Self {
        date.0
    }
}

/// Seed for the tournament held on `date`.
#[must_use]
pub fn daily_seed(date: TournamentDate) -> u32 {
    date.seed()
}

impl std::fmt::Display for TournamentDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for TournamentDate {
    type Err = DateError;

    /// Strict `YYYY-MM-DD`: zero-padded month and day, four-digit year.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 10 {
            return Err(DateError(s.to_string()));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DateError(s.to_string()))
            .and_then(Self::try_from)
    }
}

/// `m:ss`, rounding partial seconds up.
#[must_use]
pub fn format_time_remaining(ms: u64) -> String {
    let total_seconds = ms.div_ceil(1000);
    format!("{}:{:02}", total_seconds / 60, total_seconds % 60)
}
