//! HTTP DTOs for session endpoints.

use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionsQuery {
    /// Single-session mode; excludes the date window.
    pub session_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Exact id or comma-separated set.
    pub program_id: Option<String>,
    #[serde(rename = "type")]
    pub schedule_type: Option<String>,
    pub host_id: Option<String>,
    pub location_id: Option<String>,
    /// `HH:MM` bound on the session's local start.
    pub start_time: Option<String>,
    /// `HH:MM` bound on the session's local start.
    pub end_time: Option<String>,
}
