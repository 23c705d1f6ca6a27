//! HTTP DTOs for attendance endpoints.

use serde::Deserialize;

use crate::domain::attendance::AttendanceStatus;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceQuery {
    /// Session-scoped listing; otherwise the caller's own records.
    pub session_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInRequest {
    pub booking_id: String,
    /// Body-level fallback when no claim or header names the subject.
    pub subject_id: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverrideAttendanceRequest {
    pub session_id: String,
    pub booking_id: String,
    pub status: AttendanceStatus,
}
