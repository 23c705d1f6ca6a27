//! CreateBookingHandler - the booking engine's create protocol.
//!
//! 1. Resolve the session from its id: load the schedule and the date's
//!    exception; a missing schedule or a CANCELLED date is `SessionNotFound`.
//! 2. Duplicate check: an active booking for the same subject short-circuits.
//! 3. Transact: one conditional multi-entity write persists the booking and
//!    reserves the seat, or cancels with `AtCapacity`.

use std::sync::Arc;

use serde_json::{Map, Value as JsonValue};

use crate::domain::booking::Booking;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId, SubjectId, TenantId};
use crate::domain::scheduling::{resolve_capacity, ExceptionType};
use crate::ports::{BookingRepository, ExceptionRepository, ScheduleRepository};

/// Command to book a subject onto a session.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
    pub subject_id: SubjectId,
    /// Defaults to MEMBER when absent.
    pub subject_type: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    /// Pass-through metadata (goalId, bookingType, contactInfo, ...).
    pub extra: Map<String, JsonValue>,
}

impl CreateBookingCommand {
    pub fn new(tenant_id: TenantId, session_id: SessionId, subject_id: SubjectId) -> Self {
        Self {
            tenant_id,
            session_id,
            subject_id,
            subject_type: None,
            source: None,
            notes: None,
            extra: Map::new(),
        }
    }
}

/// Result of the create protocol.
///
/// The HTTP surface treats `AlreadyBooked` as a conflict; the event worker
/// treats it as an idempotent success.
#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Created(Booking),
    AlreadyBooked(Booking),
}

impl BookingOutcome {
    pub fn booking(&self) -> &Booking {
        match self {
            BookingOutcome::Created(b) | BookingOutcome::AlreadyBooked(b) => b,
        }
    }
}

/// Handler for creating bookings.
pub struct CreateBookingHandler {
    schedules: Arc<dyn ScheduleRepository>,
    exceptions: Arc<dyn ExceptionRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl CreateBookingHandler {
    pub fn new(
        schedules: Arc<dyn ScheduleRepository>,
        exceptions: Arc<dyn ExceptionRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            schedules,
            exceptions,
            bookings,
        }
    }

    pub async fn handle(&self, cmd: CreateBookingCommand) -> Result<BookingOutcome, DomainError> {
        // 1. Resolve the session.
        let schedule = self
            .schedules
            .get(&cmd.tenant_id, cmd.session_id.schedule_id())
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::SessionNotFound, "Session", &cmd.session_id)
            })?;

        let exception = self
            .exceptions
            .get(&cmd.tenant_id, cmd.session_id.schedule_id(), cmd.session_id.date())
            .await?;
        if matches!(&exception, Some(e) if e.exception_type == ExceptionType::Cancelled) {
            return Err(DomainError::not_found(
                ErrorCode::SessionNotFound,
                "Session",
                &cmd.session_id,
            ));
        }
        let capacity = resolve_capacity(&schedule, exception.as_ref());

        // 2. Duplicate check.
        let existing = self
            .bookings
            .list_by_session(&cmd.tenant_id, &cmd.session_id)
            .await?;
        if let Some(active) = existing
            .into_iter()
            .find(|b| b.subject_id == cmd.subject_id && b.is_active())
        {
            return Ok(BookingOutcome::AlreadyBooked(active));
        }

        // 3. Transact: booking put + capacity reserve, both or neither.
        let mut booking = Booking::confirmed(
            cmd.tenant_id,
            cmd.session_id,
            cmd.subject_id,
            cmd.subject_type.unwrap_or_else(|| "MEMBER".to_string()),
        );
        booking.source = cmd.source;
        booking.notes = cmd.notes;
        booking.extra = cmd.extra;

        self.bookings.create_confirmed(&booking, capacity).await?;
        Ok(BookingOutcome::Created(booking))
    }
}
