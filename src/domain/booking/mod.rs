//! Booking domain - reservations against virtual sessions.

mod booking;
mod events;

pub use booking::{Booking, BookingStatus};
pub use events::{
    detail_types, AppointmentFailedDetail, AppointmentScheduledDetail, BookingConfirmedDetail,
    BookingFailedDetail, SessionDetails,
};
