//! In-memory BookingRepository: queries plus the two conditional
//! transactions composed with the capacity ledger.

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, SessionId, SubjectId, TenantId, Timestamp,
};
use crate::ports::BookingRepository;

use super::{ledger, MemoryStore};

#[async_trait]
impl BookingRepository for MemoryStore {
    async fn create_confirmed(
        &self,
        booking: &Booking,
        resolved_capacity: Option<u32>,
    ) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let key = (
            booking.tenant_id.clone(),
            booking.session_id.clone(),
            booking.booking_id.clone(),
        );
        if tables.bookings.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::StoreConflict,
                format!("booking {} already exists", booking.booking_id),
            ));
        }

        // Reserve first: if the capacity condition cancels, nothing was written.
        ledger::reserve(
            &mut tables,
            &booking.tenant_id,
            &booking.session_id,
            resolved_capacity,
        )?;

        tables.bookings.insert(key, booking.clone());
        tables.booking_index.insert(
            (booking.tenant_id.clone(), booking.booking_id.clone()),
            booking.session_id.clone(),
        );
        Ok(())
    }

    async fn cancel(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
        booking_id: &BookingId,
        cancelled_at: Timestamp,
    ) -> Result<Booking, DomainError> {
        let mut tables = self.lock();
        let key = (tenant.clone(), session_id.clone(), booking_id.clone());

        let current = tables
            .bookings
            .get(&key)
            .ok_or_else(|| DomainError::not_found(ErrorCode::BookingNotFound, "Booking", booking_id))?;
        if current.status == BookingStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::AlreadyCancelled,
                format!("booking {} is already cancelled", booking_id),
            ));
        }

        // Release before committing the status flip; a failed release
        // leaves the booking untouched.
        ledger::release(&mut tables, tenant, session_id)?;

        let booking = tables.bookings.get_mut(&key).expect("checked above");
        booking.status = BookingStatus::Cancelled;
        booking.cancelled_at = Some(cancelled_at);
        Ok(booking.clone())
    }

    async fn get(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, DomainError> {
        let tables = self.lock();
        Ok(tables
            .bookings
            .get(&(tenant.clone(), session_id.clone(), booking_id.clone()))
            .cloned())
    }

    async fn get_by_id(
        &self,
        tenant: &TenantId,
        booking_id: &BookingId,
    ) -> Result<Option<Booking>, DomainError> {
        let tables = self.lock();
        let session_id = match tables.booking_index.get(&(tenant.clone(), booking_id.clone())) {
            Some(s) => s.clone(),
            None => return Ok(None),
        };
        Ok(tables
            .bookings
            .get(&(tenant.clone(), session_id, booking_id.clone()))
            .cloned())
    }

    async fn list_by_session(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
    ) -> Result<Vec<Booking>, DomainError> {
        let tables = self.lock();
        Ok(tables
            .bookings
            .iter()
            .filter(|((t, s, _), _)| t == tenant && s == session_id)
            .map(|(_, b)| b.clone())
            .collect())
    }

    async fn list_by_subject(
        &self,
        tenant: &TenantId,
        subject: &SubjectId,
        status: Option<BookingStatus>,
        limit: Option<usize>,
    ) -> Result<Vec<Booking>, DomainError> {
        let tables = self.lock();
        let mut bookings: Vec<Booking> = tables
            .bookings
            .iter()
            .filter(|((t, _, _), b)| t == tenant && &b.subject_id == subject)
            .filter(|(_, b)| status.map_or(true, |s| b.status == s))
            .map(|(_, b)| b.clone())
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        if let Some(limit) = limit {
            bookings.truncate(limit);
        }
        Ok(bookings)
    }
}
