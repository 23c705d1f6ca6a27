//! HTTP DTOs for booking endpoints.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsQuery {
    /// Session-scoped listing; otherwise the caller's own bookings.
    pub session_id: Option<String>,
    pub limit: Option<usize>,
    /// CONFIRMED / CANCELLED / WAITLIST.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub session_id: String,
    /// Body-level fallback when no claim or header names the subject.
    pub subject_id: Option<String>,
    pub subject_type: Option<String>,
    pub source: Option<String>,
    pub notes: Option<String>,
    #[serde(default)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteBookingQuery {
    pub booking_id: String,
}
