//! Time source injected into the store and service.

use crate::model::date_key::DateKey;
use chrono::{Duration, Local, NaiveDateTime};
use std::cell::Cell;

/// Wall-clock provider.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    /// Calendar day of `now()`, time-of-day stripped.
    fn today(&self) -> DateKey {
        DateKey::new(self.now().date())
    }
}

/// Local wall-clock time of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Manually driven clock for tests and replay.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Cell<NaiveDateTime>,
}

impl FixedClock {
    pub fn new(now: NaiveDateTime) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn set(&self, now: NaiveDateTime) {
        self.now.set(now);
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.now.get()
    }
}
