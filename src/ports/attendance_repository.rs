//! Attendance record repository port.

use async_trait::async_trait;

use crate::domain::attendance::AttendanceRecord;
use crate::domain::foundation::{BookingId, DomainError, SessionId, SubjectId, TenantId};

/// Persistence contract for attendance records, keyed by
/// `(tenant, session, booking)` - one record per booking.
#[async_trait]
pub trait AttendanceRepository: Send + Sync {
    /// Persists a new record, failing if one already exists for the key.
    ///
    /// # Errors
    ///
    /// - `AlreadyCheckedIn` if a record exists for `(sessionId, bookingId)`
    async fn create(&self, record: &AttendanceRecord) -> Result<(), DomainError>;

    /// Replaces a record unconditionally (administrative override path).
    async fn upsert(&self, record: &AttendanceRecord) -> Result<(), DomainError>;

    /// Fetch one record; `None` if absent.
    async fn get(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
        booking_id: &BookingId,
    ) -> Result<Option<AttendanceRecord>, DomainError>;

    /// All records on a session.
    async fn list_by_session(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
    ) -> Result<Vec<AttendanceRecord>, DomainError>;

    /// A subject's records, via the subject index.
    async fn list_by_subject(
        &self,
        tenant: &TenantId,
        subject: &SubjectId,
    ) -> Result<Vec<AttendanceRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attendance_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AttendanceRepository) {}
    }
}
