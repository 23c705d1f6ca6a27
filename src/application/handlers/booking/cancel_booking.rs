//! CancelBookingHandler - the booking engine's cancel protocol.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, SubjectId, TenantId};
use crate::ports::{BookingRepository, Clock};

/// Command to cancel a booking by id.
#[derive(Debug, Clone)]
pub struct CancelBookingCommand {
    pub tenant_id: TenantId,
    pub booking_id: BookingId,
    /// When known, must match the booking's subject.
    pub requester: Option<SubjectId>,
}

/// Handler for cancelling bookings.
pub struct CancelBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
}

impl CancelBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { bookings, clock }
    }

    pub async fn handle(&self, cmd: CancelBookingCommand) -> Result<Booking, DomainError> {
        let booking = self
            .bookings
            .get_by_id(&cmd.tenant_id, &cmd.booking_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::BookingNotFound, "Booking", &cmd.booking_id)
            })?;

        if let Some(requester) = &cmd.requester {
            if requester != &booking.subject_id {
                return Err(DomainError::new(
                    ErrorCode::Forbidden,
                    "booking belongs to a different subject",
                ));
            }
        }

        if booking.status == BookingStatus::Cancelled {
            return Err(DomainError::new(
                ErrorCode::AlreadyCancelled,
                format!("booking {} is already cancelled", cmd.booking_id),
            ));
        }

        // Transact: status flip + seat release, both or neither.
        self.bookings
            .cancel(
                &cmd.tenant_id,
                &booking.session_id,
                &cmd.booking_id,
                self.clock.now(),
            )
            .await
    }
}
