//! Booking lifecycle handlers.

mod cancel_booking;
mod create_booking;

pub use cancel_booking::{CancelBookingCommand, CancelBookingHandler};
pub use create_booking::{BookingOutcome, CreateBookingCommand, CreateBookingHandler};
