//! CheckInHandler - GPS-and-time-gated attendance recording.
//!
//! 1. The booking must exist, be CONFIRMED, and belong to the caller.
//! 2. A prior check-in forbids another one.
//! 3. The session is materialized to obtain its absolute start and location.
//! 4. The time window is validated, then the GPS distance when coordinates
//!    were provided.
//! 5. The record is persisted with the status the time check derived.

use std::sync::Arc;

use crate::domain::attendance::{
    classify_check_in, verify_proximity, AttendanceRecord, AttendanceStatus, CheckInMethod,
    CheckInWindow,
};
use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, SubjectId, TenantId};
use crate::domain::geo::Coordinates;
use crate::ports::{AttendanceRepository, BookingRepository, Clock, LocationRepository};

use super::super::sessions::QuerySessionsHandler;

/// Command to record attendance for a booking.
#[derive(Debug, Clone)]
pub struct CheckInCommand {
    pub tenant_id: TenantId,
    pub booking_id: BookingId,
    /// When known, must match the booking's subject.
    pub requester: Option<SubjectId>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Handler for creating check-ins.
pub struct CheckInHandler {
    bookings: Arc<dyn BookingRepository>,
    locations: Arc<dyn LocationRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    sessions: Arc<QuerySessionsHandler>,
    clock: Arc<dyn Clock>,
    window: CheckInWindow,
}

impl CheckInHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        locations: Arc<dyn LocationRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        sessions: Arc<QuerySessionsHandler>,
        clock: Arc<dyn Clock>,
        window: CheckInWindow,
    ) -> Self {
        Self {
            bookings,
            locations,
            attendance,
            sessions,
            clock,
            window,
        }
    }

    pub async fn handle(&self, cmd: CheckInCommand) -> Result<AttendanceRecord, DomainError> {
        // 1. Load and authorize the booking.
        let booking = self
            .bookings
            .get_by_id(&cmd.tenant_id, &cmd.booking_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::BookingNotFound, "Booking", &cmd.booking_id)
            })?;
        if booking.status != BookingStatus::Confirmed {
            return Err(DomainError::bad_input(
                "bookingId",
                "only confirmed bookings can check in",
            ));
        }
        if let Some(requester) = &cmd.requester {
            if requester != &booking.subject_id {
                return Err(DomainError::new(
                    ErrorCode::Forbidden,
                    "booking belongs to a different subject",
                ));
            }
        }

        // 2. Forbid duplicate check-in. A NO_SHOW set by an admin may still
        // be corrected by an actual arrival.
        let prior = self
            .attendance
            .get(&cmd.tenant_id, &booking.session_id, &cmd.booking_id)
            .await?;
        if matches!(&prior, Some(r) if r.status != AttendanceStatus::NoShow) {
            return Err(DomainError::new(
                ErrorCode::AlreadyCheckedIn,
                format!("booking {} has already checked in", cmd.booking_id),
            ));
        }

        // 3. Materialize the session for its start and location.
        let session = self
            .sessions
            .get_session(&cmd.tenant_id, &booking.session_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::SessionNotFound, "Session", &booking.session_id)
            })?;

        // 4. Time window, then GPS when coordinates were provided.
        let now = self.clock.now();
        let status = classify_check_in(&now, &session.start, &self.window)?;

        let mut method = CheckInMethod::Manual;
        let mut distance_meters = None;
        if let (Some(lat), Some(lng)) = (cmd.lat, cmd.lng) {
            method = CheckInMethod::Gps;
            let caller = Coordinates::new(lat, lng)?;
            let venue = match &session.location_id {
                Some(location_id) => self
                    .locations
                    .get(&cmd.tenant_id, location_id)
                    .await?
                    .and_then(|l| l.coordinates.map(|c| (c, l.check_in_radius_meters))),
                None => None,
            };
            // Without stored coordinates there is nothing to measure against.
            if let Some((venue, radius)) = venue {
                distance_meters = Some(verify_proximity(&caller, &venue, radius)?);
            }
        }

        // 5. Persist.
        let record = AttendanceRecord {
            tenant_id: cmd.tenant_id,
            session_id: booking.session_id.clone(),
            booking_id: cmd.booking_id,
            subject_id: booking.subject_id.clone(),
            status,
            check_in_time: Some(now),
            check_in_method: method,
            check_in_lat: cmd.lat,
            check_in_lng: cmd.lng,
            distance_meters,
            created_at: prior.as_ref().map_or(now, |r| r.created_at),
            updated_at: now,
        };
        match prior {
            Some(_) => self.attendance.upsert(&record).await?,
            None => self.attendance.create(&record).await?,
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::FixedClock;
    use crate::adapters::memory::MemoryStore;
    use crate::domain::booking::Booking;
    use crate::domain::foundation::{
        LocationId, ProgramId, ScheduleId, SessionId, Timestamp,
    };
    use crate::domain::scheduling::{Location, Schedule, ScheduleType};
    use crate::ports::{ExceptionRepository, ScheduleRepository};
    use chrono::{DateTime, Utc};
    use serde_json::Map;

    fn tenant() -> TenantId {
        TenantId::new("t1").unwrap()
    }

    fn ts(s: &str) -> Timestamp {
        Timestamp::from_datetime(DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc))
    }

    /// Schedule whose Monday session starts 2025-01-06 12:00Z (07:00 Eastern).
    fn schedule() -> Schedule {
        let now = Timestamp::now();
        Schedule {
            tenant_id: tenant(),
            schedule_id: ScheduleId::new("sched_x").unwrap(),
            schedule_type: ScheduleType::Session,
            program_id: Some(ProgramId::new("prog_1").unwrap()),
            start: "2025-01-06T07:00:00".to_string(),
            end: "2025-01-06T08:00:00".to_string(),
            timezone: "America/New_York".to_string(),
            is_recurring: true,
            rrule: Some("RRULE:FREQ=WEEKLY;BYDAY=MO".to_string()),
            base_capacity: Some(10),
            hosts: vec![],
            location_id: Some(LocationId::new("loc1").unwrap()),
            tags: vec![],
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    async fn seed(store: &MemoryStore) -> Booking {
        ScheduleRepository::put(store, &schedule()).await.unwrap();

        let mut location = Location::new(
            tenant(),
            LocationId::new("loc1").unwrap(),
            "Downtown Studio",
        )
        .unwrap();
        location.coordinates = Some(Coordinates::new(30.2672, -97.7431).unwrap());
        LocationRepository::put(store, &location).await.unwrap();

        let booking = Booking::confirmed(
            tenant(),
            "sched_x#2025-01-06".parse().unwrap(),
            SubjectId::new("member_1").unwrap(),
            "MEMBER",
        );
        store.create_confirmed(&booking, Some(10)).await.unwrap();
        booking
    }

    fn handler(store: &MemoryStore, now: Timestamp) -> CheckInHandler {
        let sessions = Arc::new(QuerySessionsHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
        ));
        CheckInHandler::new(
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            Arc::new(store.clone()),
            sessions,
            Arc::new(FixedClock::at(now)),
            CheckInWindow::default(),
        )
    }

    fn cmd(booking: &Booking, lat: Option<f64>, lng: Option<f64>) -> CheckInCommand {
        CheckInCommand {
            tenant_id: tenant(),
            booking_id: booking.booking_id.clone(),
            requester: Some(SubjectId::new("member_1").unwrap()),
            lat,
            lng,
        }
    }

    #[tokio::test]
    async fn gps_check_in_within_radius_is_present() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        // Five minutes before start.
        let h = handler(&store, ts("2025-01-06T11:55:00Z"));

        let record = h
            .handle(cmd(&booking, Some(30.2675), Some(-97.7428)))
            .await
            .unwrap();
        assert_eq!(record.status, AttendanceStatus::Present);
        assert_eq!(record.check_in_method, CheckInMethod::Gps);
        let d = record.distance_meters.unwrap();
        assert!((40.0..45.0).contains(&d), "expected ~42m, got {}", d);
    }

    #[tokio::test]
    async fn gps_check_in_outside_radius_fails() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        let h = handler(&store, ts("2025-01-06T11:55:00Z"));

        let err = h
            .handle(cmd(&booking, Some(30.2700), Some(-97.7500)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OutOfRange);
    }

    #[tokio::test]
    async fn check_in_without_coordinates_is_manual() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        let h = handler(&store, ts("2025-01-06T12:05:00Z"));

        let record = h.handle(cmd(&booking, None, None)).await.unwrap();
        assert_eq!(record.check_in_method, CheckInMethod::Manual);
        assert_eq!(record.status, AttendanceStatus::Late);
        assert!(record.distance_meters.is_none());
    }

    #[tokio::test]
    async fn too_early_and_too_late_are_rejected() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;

        let err = handler(&store, ts("2025-01-06T11:30:00Z"))
            .handle(cmd(&booking, None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TooEarly);

        let err = handler(&store, ts("2025-01-06T12:30:00Z"))
            .handle(cmd(&booking, None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TooLate);
    }

    #[tokio::test]
    async fn duplicate_check_in_is_rejected() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        let h = handler(&store, ts("2025-01-06T11:55:00Z"));

        h.handle(cmd(&booking, None, None)).await.unwrap();
        let err = h.handle(cmd(&booking, None, None)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyCheckedIn);
    }

    #[tokio::test]
    async fn wrong_subject_is_forbidden() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        let h = handler(&store, ts("2025-01-06T11:55:00Z"));

        let mut c = cmd(&booking, None, None);
        c.requester = Some(SubjectId::new("member_2").unwrap());
        let err = h.handle(c).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn cancelled_booking_cannot_check_in() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        let session: SessionId = "sched_x#2025-01-06".parse().unwrap();
        BookingRepository::cancel(&store, &tenant(), &session, &booking.booking_id, Timestamp::now())
            .await
            .unwrap();

        let err = handler(&store, ts("2025-01-06T11:55:00Z"))
            .handle(cmd(&booking, None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadInput);
    }

    #[tokio::test]
    async fn cancelled_session_date_is_not_found() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        ExceptionRepository::put(
            &store,
            &crate::domain::scheduling::ScheduleException::cancelled(
                tenant(),
                ScheduleId::new("sched_x").unwrap(),
                "2025-01-06".parse().unwrap(),
            ),
        )
        .await
        .unwrap();

        let err = handler(&store, ts("2025-01-06T11:55:00Z"))
            .handle(cmd(&booking, None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn missing_location_coordinates_skip_the_distance_check() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;
        // Replace the location with one lacking coordinates.
        let location = Location::new(
            tenant(),
            LocationId::new("loc1").unwrap(),
            "Unmapped Studio",
        )
        .unwrap();
        LocationRepository::put(&store, &location).await.unwrap();

        let record = handler(&store, ts("2025-01-06T11:55:00Z"))
            .handle(cmd(&booking, Some(30.2675), Some(-97.7428)))
            .await
            .unwrap();
        assert_eq!(record.check_in_method, CheckInMethod::Gps);
        assert!(record.distance_meters.is_none());
    }

    #[tokio::test]
    async fn window_check_runs_before_gps_check() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;

        // Both too early and out of range: the window failure wins.
        let err = handler(&store, ts("2025-01-06T11:00:00Z"))
            .handle(cmd(&booking, Some(30.2700), Some(-97.7500)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TooEarly);
    }

    #[tokio::test]
    async fn bad_coordinates_are_rejected() {
        let store = MemoryStore::new();
        let booking = seed(&store).await;

        let err = handler(&store, ts("2025-01-06T11:55:00Z"))
            .handle(cmd(&booking, Some(95.0), Some(0.0)))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BadCoordinates);
    }
}
