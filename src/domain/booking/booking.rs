//! Booking entity and its lifecycle.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, SessionId, SubjectId, TenantId, Timestamp,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "WAITLIST")]
    Waitlist,
}

/// A subject's reservation on one session.
///
/// `CONFIRMED -> CANCELLED` is the only transition; there is no un-cancel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
    pub booking_id: BookingId,
    pub subject_id: SubjectId,
    /// Free-form subject kind: MEMBER, LEAD, PATIENT, ...
    pub subject_type: String,
    pub status: BookingStatus,
    pub created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancelled_at: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Extension envelope for caller-defined fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, JsonValue>,
}

impl Booking {
    /// Creates a confirmed booking with a fresh id.
    pub fn confirmed(
        tenant_id: TenantId,
        session_id: SessionId,
        subject_id: SubjectId,
        subject_type: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id,
            session_id,
            booking_id: BookingId::generate(),
            subject_id,
            subject_type: subject_type.into(),
            status: BookingStatus::Confirmed,
            created_at: Timestamp::now(),
            cancelled_at: None,
            source: None,
            notes: None,
            extra: Map::new(),
        }
    }

    /// Whether this booking holds a seat (anything but CANCELLED).
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }

    /// Transitions to CANCELLED. Cancelling twice is an error so the seat is
    /// never released twice.
    pub fn cancel(&mut self, at: Timestamp) -> Result<(), DomainError> {
        if self.status == BookingStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::AlreadyCancelled,
                format!("booking {} is already cancelled", self.booking_id),
            ));
        }
        self.status = BookingStatus::Cancelled;
        self.cancelled_at = Some(at);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn booking() -> Booking {
        Booking::confirmed(
            TenantId::new("t1").unwrap(),
            "sched_x#2025-01-06".parse().unwrap(),
            SubjectId::new("member_1").unwrap(),
            "MEMBER",
        )
    }

    #[test]
    fn confirmed_bookings_are_active() {
        let b = booking();
        assert_eq!(b.status, BookingStatus::Confirmed);
        assert!(b.is_active());
        assert!(b.cancelled_at.is_none());
    }

    #[test]
    fn cancel_transitions_once() {
        let mut b = booking();
        let at = Timestamp::now();
        b.cancel(at).unwrap();

        assert_eq!(b.status, BookingStatus::Cancelled);
        assert_eq!(b.cancelled_at, Some(at));
        assert!(!b.is_active());
    }

    #[test]
    fn cancel_twice_is_rejected() {
        let mut b = booking();
        b.cancel(Timestamp::now()).unwrap();
        let err = b.cancel(Timestamp::now()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyCancelled);
    }

    #[test]
    fn status_serializes_upper_case() {
        let value = serde_json::to_value(booking()).unwrap();
        assert_eq!(value["status"], "CONFIRMED");
        assert_eq!(value["subjectType"], "MEMBER");
        assert_eq!(value["sessionId"], "sched_x#2025-01-06");
    }
}
