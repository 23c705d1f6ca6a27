//! Booking repository port: queries plus the two multi-entity transactions.
//!
//! The store is assumed to provide conditional transactional writes across
//! rows. Both mutating operations here compose the booking write with the
//! capacity-ledger update on the session summary; they commit both or
//! neither.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, DomainError, SessionId, SubjectId, TenantId, Timestamp};

/// Persistence contract for bookings and their capacity ledger.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Atomically persists a confirmed booking and reserves a seat.
    ///
    /// The transaction is conditioned on:
    /// - no booking existing for `(sessionId, bookingId)`, and
    /// - when `resolved_capacity` is `Some(c)`: the summary's `bookedCount`
    ///   being absent or below `c`.
    ///
    /// The summary's stored capacity is set to `resolved_capacity` so it
    /// tracks schedule and override changes.
    ///
    /// # Errors
    ///
    /// - `AtCapacity` when the capacity condition cancels the transaction
    /// - `StoreConflict` on any other cancellation
    async fn create_confirmed(
        &self,
        booking: &Booking,
        resolved_capacity: Option<u32>,
    ) -> Result<(), DomainError>;

    /// Atomically marks a booking CANCELLED and releases its seat.
    ///
    /// The release is conditioned on `bookedCount > 0`; the booking update
    /// is conditioned on the row still being active. Returns the updated
    /// booking.
    ///
    /// # Errors
    ///
    /// - `AlreadyCancelled` if the booking is no longer active
    /// - `CounterUnderflow` if the release condition fails (a logic error:
    ///   booking invariants make it unreachable)
    async fn cancel(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
        booking_id: &BookingId,
        cancelled_at: Timestamp,
    ) -> Result<Booking, DomainError>;

    /// Fetch a booking by its full key; `None` if absent.
    async fn get(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, DomainError>;

    /// Fetch a booking by id alone, via the tenant-wide booking index.
    async fn get_by_id(
        &self,
        tenant: &TenantId,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, DomainError>;

    /// All bookings on a session.
    async fn list_by_session(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
    ) -> Result<Vec<Booking>, DomainError>;

    /// A subject's bookings, ordered by creation time descending.
    async fn list_by_subject(
        &self,
        tenant: &TenantId,
        subject: &SubjectId,
        status: Option<BookingStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<Booking>, DomainError>;
}
