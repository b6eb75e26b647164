//! Manually advanced wall clock.
//!
//! `SimClock` implements [`Clock`] over a shared millisecond counter. Clones
//! share the counter, so a test can hand one clone to the controller and keep
//! another to move time.

use std::{
    sync::{
        Arc,
        atomic::{AtomicI64, Ordering},
    },
    time::Duration,
};

use chrono::{DateTime, Utc};
use roomscreen_app::Clock;

/// Shared simulated wall clock.
#[derive(Debug, Clone)]
pub struct SimClock {
    millis: Arc<AtomicI64>,
}

impl SimClock {
    /// Clock starting at `start`.
    pub fn at(start: DateTime<Utc>) -> Self {
        Self { millis: Arc::new(AtomicI64::new(start.timestamp_millis())) }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: Duration) {
        let by = i64::try_from(by.as_millis()).unwrap_or(i64::MAX);
        self.millis.fetch_add(by, Ordering::SeqCst);
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::at(DateTime::default())
    }
}

impl Clock for SimClock {
    fn now(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.millis.load(Ordering::SeqCst)).unwrap_or_default()
    }
}
