//! OverrideAttendanceHandler - administrative attendance correction.
//!
//! Bypasses the time window and GPS checks entirely; the record is stamped
//! with `checkInMethod = OVERRIDE`.

use std::sync::Arc;

use crate::domain::attendance::{AttendanceRecord, AttendanceStatus, CheckInMethod};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, SessionId, TenantId};
use crate::ports::{AttendanceRepository, BookingRepository, Clock};

/// Command to set a booking's attendance status directly.
#[derive(Debug, Clone)]
pub struct OverrideAttendanceCommand {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
    pub booking_id: BookingId,
    pub status: AttendanceStatus,
}

/// Handler for administrative attendance overrides.
pub struct OverrideAttendanceHandler {
    bookings: Arc<dyn BookingRepository>,
    attendance: Arc<dyn AttendanceRepository>,
    clock: Arc<dyn Clock>,
}

impl OverrideAttendanceHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        attendance: Arc<dyn AttendanceRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            bookings,
            attendance,
            clock,
        }
    }

    pub async fn handle(
        &self,
        cmd: OverrideAttendanceCommand,
    ) -> Result<AttendanceRecord, DomainError> {
        // Attendance is referential: the booking must exist.
        let booking = self
            .bookings
            .get(&cmd.tenant_id, &cmd.session_id, &cmd.booking_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::BookingNotFound, "Booking", &cmd.booking_id)
            })?;

        let now = self.clock.now();
        let prior = self
            .attendance
            .get(&cmd.tenant_id, &cmd.session_id, &cmd.booking_id)
            .await?;

        let record = AttendanceRecord {
            tenant_id: cmd.tenant_id,
            session_id: cmd.session_id,
            booking_id: cmd.booking_id,
            subject_id: booking.subject_id,
            status: cmd.status,
            check_in_time: if cmd.status == AttendanceStatus::NoShow {
                None
            } else {
                Some(now)
            },
            check_in_method: CheckInMethod::Override,
            check_in_lat: None,
            check_in_lng: None,
            distance_meters: None,
            created_at: prior.as_ref().map_or(now, |r| r.created_at),
            updated_at: now,
        };
        self.attendance.upsert(&record).await?;
        Ok(record)
    }
}
