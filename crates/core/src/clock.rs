//! Injectable source of the current calendar day.
//!
//! Future-date checks and `days_left` both depend on "today". Handlers take
//! it from a [`Clock`] held in application state so tests can pin it.

use chrono::Utc;

use crate::types::Day;

/// Supplies the current calendar day (UTC).
pub trait Clock: Send + Sync {
    fn today(&self) -> Day;
}

/// Wall-clock implementation backed by [`Utc::now`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> Day {
        Utc::now().date_naive()
    }
}

/// A clock frozen on a single day.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub Day);

impl Clock for FixedClock {
    fn today(&self) -> Day {
        self.0
    }
}
