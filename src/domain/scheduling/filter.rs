//! Read-path filtering and query-range handling.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::foundation::{DomainError, ErrorCode, HostId, LocationId, ProgramId};
use crate::domain::localtime;

use super::schedule::ScheduleType;
use super::session::Session;

/// Maximum client-requested window in local days.
pub const MAX_WINDOW_DAYS: i64 = 90;

/// Widening applied to each side of a date window before expansion, covering
/// every wall clock from UTC-12 to UTC+14.
const RANGE_PADDING_HOURS: i64 = 26;

/// Validates a client-requested local date window.
pub fn validate_window(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), DomainError> {
    if end_date < start_date {
        return Err(DomainError::bad_input(
            "endDate",
            "endDate must not precede startDate",
        ));
    }
    if (end_date - start_date).num_days() > MAX_WINDOW_DAYS {
        return Err(DomainError::new(
            ErrorCode::RangeTooLarge,
            format!("requested window exceeds {} days", MAX_WINDOW_DAYS),
        ));
    }
    Ok(())
}

/// Converts a local date window into the absolute expansion range.
///
/// The caller's dates are wall-clock dates in an unknown zone; padding both
/// sides keeps every schedule's local interpretation inside the range. The
/// materialized sessions are filtered back down by their local `date`.
pub fn widened_range(start_date: NaiveDate, end_date: NaiveDate) -> (DateTime<Utc>, DateTime<Utc>) {
    let start = Utc.from_utc_datetime(&start_date.and_hms_opt(0, 0, 0).expect("valid midnight"))
        - Duration::hours(RANGE_PADDING_HOURS);
    let end = Utc.from_utc_datetime(&end_date.and_hms_opt(23, 59, 59).expect("valid end of day"))
        + Duration::hours(RANGE_PADDING_HOURS);
    (start, end)
}

/// Client-supplied session filters, applied after materialization.
#[derive(Debug, Clone, Default)]
pub struct SessionFilter {
    pub program_ids: Option<Vec<ProgramId>>,
    pub schedule_type: Option<ScheduleType>,
    pub host_id: Option<HostId>,
    pub location_id: Option<LocationId>,
    /// Inclusive lower bound on the session's local wall-clock start.
    pub start_time: Option<NaiveTime>,
    /// Inclusive upper bound on the session's local wall-clock start.
    pub end_time: Option<NaiveTime>,
}

impl SessionFilter {
    /// Parses an `HH:MM` time-of-day filter value.
    pub fn parse_time(value: &str) -> Result<NaiveTime, DomainError> {
        NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
            DomainError::bad_input("time", format!("'{}' is not an HH:MM time", value))
        })
    }

    pub fn matches(&self, session: &Session) -> bool {
        if let Some(program_ids) = &self.program_ids {
            match &session.program_id {
                Some(id) if program_ids.contains(id) => {}
                _ => return false,
            }
        }
        if let Some(schedule_type) = self.schedule_type {
            if session.schedule_type != schedule_type {
                return false;
            }
        }
        if let Some(host_id) = &self.host_id {
            if !session.hosts.iter().any(|h| &h.id == host_id) {
                return false;
            }
        }
        if let Some(location_id) = &self.location_id {
            if session.location_id.as_ref() != Some(location_id) {
                return false;
            }
        }
        if self.start_time.is_some() || self.end_time.is_some() {
            let Ok(tz) = localtime::parse_timezone(&session.timezone) else {
                return false;
            };
            let local_start = session.start.as_datetime().with_timezone(&tz).time();
            if let Some(start_time) = self.start_time {
                if local_start < start_time {
                    return false;
                }
            }
            if let Some(end_time) = self.end_time {
                if local_start > end_time {
                    return false;
                }
            }
        }
        true
    }
}
