//! Virtual sessions and their persistent counter shadow.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    LocationId, ProgramId, ScheduleId, SessionId, TenantId, Timestamp,
};

use super::schedule::{HostRef, ScheduleType};

/// One occurrence of a schedule on a specific local date.
///
/// Sessions are never stored; they are synthesized on demand from the
/// schedule, the date's exception, and the session summary. Two readers
/// materializing the same inputs observe equal sessions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub session_id: SessionId,
    pub tenant_id: TenantId,
    pub schedule_id: ScheduleId,
    /// Local occurrence date in the schedule's timezone.
    pub date: NaiveDate,
    pub start: Timestamp,
    pub end: Timestamp,
    pub timezone: String,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<ProgramId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<HostRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Resolved capacity; None means unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub booked_count: u32,
    pub waitlist_count: u32,
}

/// The persistent shadow of a session's mutable counters.
///
/// Exists only once there has been a booking against the session. The
/// stored `capacity` tracks the most recently observed resolved capacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub tenant_id: TenantId,
    pub session_id: SessionId,
    /// Local occurrence date, set when the row is first created.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
    pub booked_count: u32,
    pub waitlist_count: u32,
    pub updated_at: Timestamp,
}
