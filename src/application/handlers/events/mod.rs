//! Event-driven booking ingress.
//!
//! Each worker consumes one inbound detail type, drives the booking engine,
//! and emits exactly one result event. Failures of any kind become a
//! `_failed` event; nothing propagates back to the transport.

mod booking_requested;
mod consultation_requested;

pub use booking_requested::BookingRequestedWorker;
pub use consultation_requested::ConsultationRequestedWorker;

use crate::domain::booking::SessionDetails;
use crate::domain::localtime;
use crate::domain::scheduling::Session;

/// Formats the human-oriented session block for success events, with wall
/// clocks rendered in the session's zone.
pub(crate) fn session_details(session: &Session) -> SessionDetails {
    let (start_time, end_time) = match localtime::parse_timezone(&session.timezone) {
        Ok(tz) => (
            localtime::format_local_time(*session.start.as_datetime(), tz, "%Y-%m-%dT%H:%M:%S"),
            localtime::format_local_time(*session.end.as_datetime(), tz, "%Y-%m-%dT%H:%M:%S"),
        ),
        // Materialized sessions always carry a valid zone; fall back to UTC.
        Err(_) => (
            session.start.as_datetime().to_rfc3339(),
            session.end.as_datetime().to_rfc3339(),
        ),
    };

    SessionDetails {
        session_id: session.session_id.clone(),
        date: session.date.format("%Y-%m-%d").to_string(),
        start_time,
        end_time,
        timezone: session.timezone.clone(),
        location_id: session.location_id.clone(),
    }
}
