//! Millisecond time source for the replay recorder.
//!
//! The recorder only needs "milliseconds since some epoch". Hosts use
//! [`SystemClock`]; tests and replay tooling drive a [`ManualClock`].

use std::cell::Cell;
use std::rc::Rc;

use chrono::Utc;

/// Source of wall-clock milliseconds.
pub trait Clock {
    /// Milliseconds since the Unix epoch (or any fixed origin).
    fn now_ms(&self) -> u64;
}

/// The host's real-time clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        // Pre-epoch host clocks read as zero.
        u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0)
    }
}

/// A hand-advanced clock. Clones share the same underlying time.
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    now: Rc<Cell<u64>>,
}

impl ManualClock {
    #[must_use]
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: Rc::new(Cell::new(start_ms)),
        }
    }

    /// Move time forward by `ms`.
    pub fn advance(&self, ms: u64) {
        self.now.set(self.now.get() + ms);
    }

    /// Jump to an absolute time.
    pub fn set(&self, ms: u64) {
        self.now.set(ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.get()
    }
}
