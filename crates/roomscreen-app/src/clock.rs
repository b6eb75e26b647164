//! Wall-clock abstraction for edit-window checks.
//!
//! Decouples eligibility rules from the system clock so tests can simulate
//! elapsed time without real delays.

use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};

/// Source of the current wall-clock time.
///
/// # Invariants
///
/// - `now()` never goes backwards within a session.
pub trait Clock: Send + Sync {
    /// Current time.
    fn now(&self) -> DateTime<Utc>;

    /// Whether `window` has fully elapsed since `sent_at`.
    ///
    /// Returns `true` once `now - sent_at >= window`, so a message is expired
    /// at exactly the window boundary. A window too large to represent never
    /// expires.
    fn is_expired(&self, sent_at: DateTime<Utc>, window: Duration) -> bool {
        let elapsed = self.now().signed_duration_since(sent_at);
        TimeDelta::from_std(window).is_ok_and(|window| elapsed >= window)
    }
}

/// Production clock backed by the system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (**self).now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(DateTime<Utc>);

    impl Clock for Fixed {
        fn now(&self) -> DateTime<Utc> {
            self.0
        }
    }

    const WINDOW: Duration = Duration::from_secs(5 * 60);

    #[test]
    fn expiry_boundary_is_inclusive() {
        let sent = DateTime::<Utc>::UNIX_EPOCH;

        let before = Fixed(sent + TimeDelta::seconds(299));
        assert!(!before.is_expired(sent, WINDOW));

        let exact = Fixed(sent + TimeDelta::seconds(300));
        assert!(exact.is_expired(sent, WINDOW));

        let after = Fixed(sent + TimeDelta::seconds(301));
        assert!(after.is_expired(sent, WINDOW));
    }

    #[test]
    fn future_timestamps_are_not_expired() {
        let now = DateTime::<Utc>::UNIX_EPOCH;
        let clock = Fixed(now);

        assert!(!clock.is_expired(now + TimeDelta::seconds(10), WINDOW));
    }
}
