//! Timestamp value object for immutable points in time.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Signed difference `self - other` in whole minutes.
    pub fn minutes_since(&self, other: &Timestamp) -> i64 {
        (self.0 - other.0).num_minutes()
    }

    /// Returns this timestamp shifted by a signed duration.
    pub fn plus(&self, duration: Duration) -> Self {
        Self(self.0 + duration)
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    #[test]
    fn minutes_since_is_signed() {
        let start = ts("2025-01-06T07:00:00Z");
        let late = ts("2025-01-06T07:10:00Z");

        assert_eq!(late.minutes_since(&start), 10);
        assert_eq!(start.minutes_since(&late), -10);
    }

    #[test]
    fn plus_shifts_by_duration() {
        let start = ts("2025-01-06T07:00:00Z");
        let shifted = start.plus(Duration::hours(1));
        assert_eq!(shifted, ts("2025-01-06T08:00:00Z"));
    }

    #[test]
    fn ordering_works() {
        let earlier = ts("2025-01-06T07:00:00Z");
        let later = ts("2025-01-06T08:00:00Z");

        assert!(earlier.is_before(&later));
        assert!(later.is_after(&earlier));
        assert!(earlier < later);
    }

    #[test]
    fn serializes_to_rfc3339_json() {
        let t = ts("2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&t).unwrap();
        assert!(json.contains("2024-01-15"));

        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, t);
    }
}
