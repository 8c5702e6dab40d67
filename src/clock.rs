//! Time sources. Scheduling code takes `now` as an argument; only callers
//! at the edge read a clock.

use crate::models::Timestamp;
use chrono::Utc;
use std::cell::Cell;

pub const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub trait Clock {
    fn now(&self) -> Timestamp;
}

/// Wall clock, UTC seconds.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now().timestamp()
    }
}

/// Clock that only moves when told to. Used to simulate days passing
/// between study sessions.
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn set(&self, now: Timestamp) {
        self.now.set(now);
    }

    pub fn advance(&self, secs: i64) {
        self.now.set(self.now.get().saturating_add(secs));
    }

    pub fn advance_day(&self) {
        self.advance(SECONDS_PER_DAY);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        self.now.get()
    }
}
