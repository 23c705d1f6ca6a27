//! Local-time translation between absolute instants, zoned wall clocks, and
//! naive datetimes.
//!
//! Three representations are in play:
//!
//! 1. absolute instants (`DateTime<Utc>`), used by the store and the API;
//! 2. wall-clock datetimes in an IANA zone;
//! 3. naive datetimes whose components are wall-clock values handled as if
//!    they were absolute - the recurrence expander's working representation.
//!
//! DST policy: an ambiguous local time (fall-back) resolves to the earlier
//! instant; a nonexistent local time (spring-forward gap) advances one hour
//! and resolves again.

use chrono::offset::LocalResult;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use super::foundation::{DomainError, ErrorCode};

/// Parses an IANA zone name (e.g. "America/New_York").
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse::<Tz>().map_err(|_| {
        DomainError::new(ErrorCode::BadDateTime, format!("unknown timezone '{}'", name))
    })
}

/// Parses a datetime string into an absolute instant.
///
/// Inputs ending in `Z` or carrying an explicit offset are parsed as
/// absolute. Otherwise the `YYYY-MM-DDTHH:MM[:SS]` components are
/// interpreted as wall-clock time in `zone`.
pub fn parse_local(s: &str, zone: Tz) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|_| {
            DomainError::new(ErrorCode::BadDateTime, format!("unparseable datetime '{}'", s))
        })?;

    naive_to_absolute(naive, zone)
}

/// Converts an absolute instant to the naive wall clock in `zone`.
pub fn absolute_to_naive(instant: DateTime<Utc>, zone: Tz) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

/// Converts a naive wall clock in `zone` back to an absolute instant,
/// applying the DST policy above.
pub fn naive_to_absolute(naive: NaiveDateTime, zone: Tz) -> Result<DateTime<Utc>, DomainError> {
    match zone.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        LocalResult::Ambiguous(earlier, _later) => Ok(earlier.with_timezone(&Utc)),
        LocalResult::None => {
            // Spring-forward gap: the wall clock skipped this time.
            let shifted = naive + Duration::hours(1);
            match zone.from_local_datetime(&shifted) {
                LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
                LocalResult::Ambiguous(earlier, _later) => Ok(earlier.with_timezone(&Utc)),
                LocalResult::None => Err(DomainError::new(
                    ErrorCode::BadDateTime,
                    format!("local time {} does not exist in {}", naive, zone),
                )),
            }
        }
    }
}

/// Formats the local date of an instant as `YYYY-MM-DD`.
pub fn format_local_date(instant: DateTime<Utc>, zone: Tz) -> String {
    instant.with_timezone(&zone).format("%Y-%m-%d").to_string()
}

/// Formats an instant's wall clock in `zone` with a strftime pattern.
pub fn format_local_time(instant: DateTime<Utc>, zone: Tz, fmt: &str) -> String {
    instant.with_timezone(&zone).format(fmt).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use chrono_tz::America::New_York;

    fn naive(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    #[test]
    fn parses_explicit_utc_as_absolute() {
        let dt = parse_local("2025-01-06T12:00:00Z", New_York).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-06T12:00:00+00:00");
    }

    #[test]
    fn parses_explicit_offset_as_absolute() {
        let dt = parse_local("2025-01-06T07:00:00-05:00", New_York).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-06T12:00:00+00:00");
    }

    #[test]
    fn parses_bare_wall_clock_in_zone() {
        // 7 AM in New York during EST is noon UTC.
        let dt = parse_local("2025-01-06T07:00:00", New_York).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-06T12:00:00+00:00");
    }

    #[test]
    fn parses_minutes_only_precision() {
        let dt = parse_local("2025-01-06T07:00", New_York).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-06T12:00:00+00:00");
    }

    #[test]
    fn rejects_garbage() {
        let result = parse_local("not-a-datetime", New_York);
        assert!(matches!(result, Err(e) if e.code == ErrorCode::BadDateTime));
    }

    #[test]
    fn rejects_unknown_timezone() {
        assert!(parse_timezone("Nowhere/Special").is_err());
        assert!(parse_timezone("America/New_York").is_ok());
    }

    #[test]
    fn naive_round_trip_is_identity_when_unambiguous() {
        let n = naive(2025, 1, 6, 7, 0, 0);
        let abs = naive_to_absolute(n, New_York).unwrap();
        assert_eq!(absolute_to_naive(abs, New_York), n);
    }

    #[test]
    fn ambiguous_fall_back_resolves_to_earlier_instant() {
        // 2024-11-03 01:30 occurs twice in New York; the earlier reading is
        // EDT (-04:00), i.e. 05:30Z.
        let n = naive(2024, 11, 3, 1, 30, 0);
        let abs = naive_to_absolute(n, New_York).unwrap();
        assert_eq!(abs.to_rfc3339(), "2024-11-03T05:30:00+00:00");
    }

    #[test]
    fn gap_spring_forward_advances_one_hour() {
        // 2025-03-09 02:30 never happens in New York; policy lands on 03:30 EDT.
        let n = naive(2025, 3, 9, 2, 30, 0);
        let abs = naive_to_absolute(n, New_York).unwrap();
        assert_eq!(abs.to_rfc3339(), "2025-03-09T07:30:00+00:00");
    }

    #[test]
    fn format_local_date_uses_zone_wall_clock() {
        // Monday 7 PM EST is Tuesday 00:00 UTC; the local date must stay Monday.
        let dt = parse_local("2025-01-13T19:00:00", New_York).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-01-14T00:00:00+00:00");
        assert_eq!(format_local_date(dt, New_York), "2025-01-13");
    }

    #[test]
    fn format_local_time_applies_pattern() {
        let dt = parse_local("2025-01-06T07:00:00", New_York).unwrap();
        assert_eq!(format_local_time(dt, New_York, "%H:%M"), "07:00");
        assert_eq!(
            format_local_time(dt, New_York, "%Y-%m-%dT%H:%M:%S"),
            "2025-01-06T07:00:00"
        );
    }

    #[test]
    fn parse_then_format_round_trips_wall_clock() {
        let wall = "2025-06-15T18:45:30";
        let abs = parse_local(wall, New_York).unwrap();
        assert_eq!(format_local_time(abs, New_York, "%Y-%m-%dT%H:%M:%S"), wall);
    }
}
