//! Attendance records and the check-in validation rules.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, SessionId, SubjectId, TenantId, Timestamp,
};
use crate::domain::geo::Coordinates;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceStatus {
    #[serde(rename = "PRESENT")]
    Present,
    #[serde(rename = "LATE")]
    Late,
    #[serde(rename = "NO_SHOW")]
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckInMethod {
    #[serde(rename = "GPS")]
    Gps,
    #[serde(rename = "MANUAL")]
    Manual,
    #[serde(rename = "OVERRIDE")]
    Override,
}

/// One attendance record per booking, created at first check-in and updated
/// only by administrative override.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
    pub booking_id: BookingId,
    pub subject_id: SubjectId,
    pub status: AttendanceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_time: Option<Timestamp>,
    pub check_in_method: CheckInMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_in_lng: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<f64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The interval around a session start during which attendance may be
/// recorded: `[start - minutes_before, start + minutes_after]`.
#[derive(Debug, Clone, Copy)]
pub struct CheckInWindow {
    pub minutes_before: i64,
    pub minutes_after: i64,
}

impl Default for CheckInWindow {
    fn default() -> Self {
        Self {
            minutes_before: 15,
            minutes_after: 15,
        }
    }
}

/// Classifies a check-in against the session start.
///
/// Inside the window, a check-in after the start is LATE, otherwise PRESENT.
pub fn classify_check_in(
    check_in_time: &Timestamp,
    session_start: &Timestamp,
    window: &CheckInWindow,
) -> Result<AttendanceStatus, DomainError> {
    let delta_minutes = check_in_time.minutes_since(session_start);

    if delta_minutes < -window.minutes_before {
        return Err(DomainError::new(
            ErrorCode::TooEarly,
            format!(
                "check-in is {} minutes early; allowed from {} minutes before start",
                -delta_minutes, window.minutes_before
            ),
        ));
    }
    if delta_minutes > window.minutes_after {
        return Err(DomainError::new(
            ErrorCode::TooLate,
            format!(
                "check-in is {} minutes late; allowed until {} minutes after start",
                delta_minutes, window.minutes_after
            ),
        ));
    }

    if delta_minutes > 0 {
        Ok(AttendanceStatus::Late)
    } else {
        Ok(AttendanceStatus::Present)
    }
}

/// Verifies the caller is within the location's check-in radius, returning
/// the measured distance in meters.
pub fn verify_proximity(
    caller: &Coordinates,
    venue: &Coordinates,
    radius_meters: f64,
) -> Result<f64, DomainError> {
    let distance = caller.distance_meters(venue);
    if distance > radius_meters {
        return Err(DomainError::new(
            ErrorCode::OutOfRange,
            format!(
                "check-in location is {:.0} m from the session location; allowed radius is {:.0} m",
                distance, radius_meters
            ),
        ));
    }
    Ok(distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, Utc};

    fn ts(s: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    #[test]
    fn on_time_check_in_is_present() {
        let start = ts("2025-01-06T12:00:00Z");
        let status = classify_check_in(&start, &start, &CheckInWindow::default()).unwrap();
        assert_eq!(status, AttendanceStatus::Present);
    }

    #[test]
    fn early_within_window_is_present() {
        let start = ts("2025-01-06T12:00:00Z");
        let check_in = start.plus(Duration::minutes(-10));
        let status = classify_check_in(&check_in, &start, &CheckInWindow::default()).unwrap();
        assert_eq!(status, AttendanceStatus::Present);
    }

    #[test]
    fn after_start_within_window_is_late() {
        let start = ts("2025-01-06T12:00:00Z");
        let check_in = start.plus(Duration::minutes(5));
        let status = classify_check_in(&check_in, &start, &CheckInWindow::default()).unwrap();
        assert_eq!(status, AttendanceStatus::Late);
    }

    #[test]
    fn window_boundaries_are_inclusive() {
        let start = ts("2025-01-06T12:00:00Z");
        let window = CheckInWindow::default();

        let at_open = start.plus(Duration::minutes(-15));
        assert_eq!(
            classify_check_in(&at_open, &start, &window).unwrap(),
            AttendanceStatus::Present
        );

        let at_close = start.plus(Duration::minutes(15));
        assert_eq!(
            classify_check_in(&at_close, &start, &window).unwrap(),
            AttendanceStatus::Late
        );
    }

    #[test]
    fn too_early_reports_magnitude() {
        let start = ts("2025-01-06T12:00:00Z");
        let check_in = start.plus(Duration::minutes(-30));
        let err = classify_check_in(&check_in, &start, &CheckInWindow::default()).unwrap_err();

        assert_eq!(err.code, ErrorCode::TooEarly);
        assert!(err.message.contains("30 minutes early"), "{}", err.message);
    }

    #[test]
    fn too_late_reports_magnitude() {
        let start = ts("2025-01-06T12:00:00Z");
        let check_in = start.plus(Duration::minutes(45));
        let err = classify_check_in(&check_in, &start, &CheckInWindow::default()).unwrap_err();

        assert_eq!(err.code, ErrorCode::TooLate);
        assert!(err.message.contains("45 minutes late"), "{}", err.message);
    }

    #[test]
    fn custom_window_widths_apply() {
        let start = ts("2025-01-06T12:00:00Z");
        let window = CheckInWindow {
            minutes_before: 60,
            minutes_after: 5,
        };

        let early = start.plus(Duration::minutes(-45));
        assert!(classify_check_in(&early, &start, &window).is_ok());

        let late = start.plus(Duration::minutes(10));
        assert_eq!(
            classify_check_in(&late, &start, &window).unwrap_err().code,
            ErrorCode::TooLate
        );
    }

    #[test]
    fn nearby_caller_passes_proximity() {
        let venue = Coordinates::new(30.2672, -97.7431).unwrap();
        let caller = Coordinates::new(30.2675, -97.7428).unwrap();

        let distance = verify_proximity(&caller, &venue, 100.0).unwrap();
        assert!((40.0..45.0).contains(&distance), "got {}", distance);
    }

    #[test]
    fn distant_caller_is_out_of_range() {
        let venue = Coordinates::new(30.2672, -97.7431).unwrap();
        let caller = Coordinates::new(30.2700, -97.7500).unwrap();

        let err = verify_proximity(&caller, &venue, 100.0).unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
        assert!(err.message.contains("allowed radius is 100"), "{}", err.message);
    }
}
