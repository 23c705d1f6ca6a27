//! Clock adapters.

use std::sync::Mutex;

use crate::domain::foundation::Timestamp;
use crate::ports::Clock;

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// Deterministic clock for tests.
pub struct FixedClock {
    now: Mutex<Timestamp>,
}

impl FixedClock {
    pub fn at(now: Timestamp) -> Self {
        Self { now: Mutex::new(now) }
    }

    /// Moves the clock to a new instant.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn set(&self, now: Timestamp) {
        *self.now.lock().expect("FixedClock: lock poisoned") = now;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().expect("FixedClock: lock poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    #[test]
    fn fixed_clock_returns_and_updates_instant() {
        let t1 = Timestamp::from_datetime(
            DateTime::parse_from_rfc3339("2025-01-06T12:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        );
        let clock = FixedClock::at(t1);
        assert_eq!(clock.now(), t1);

        let t2 = Timestamp::now();
        clock.set(t2);
        assert_eq!(clock.now(), t2);
    }
}
