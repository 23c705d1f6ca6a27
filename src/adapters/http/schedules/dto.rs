//! HTTP DTOs for schedule endpoints.

use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::domain::scheduling::{HostRef, ScheduleType};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleQuery {
    pub schedule_id: Option<String>,
    pub program_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScheduleRequest {
    /// Generated when absent.
    pub schedule_id: Option<String>,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    pub program_id: Option<String>,
    pub start: String,
    pub end: String,
    pub timezone: String,
    #[serde(default)]
    pub is_recurring: bool,
    pub rrule: Option<String>,
    pub base_capacity: Option<u32>,
    #[serde(default)]
    pub hosts: Vec<HostRef>,
    pub location_id: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateScheduleRequest {
    pub schedule_id: String,
    #[serde(rename = "type")]
    pub schedule_type: Option<ScheduleType>,
    pub program_id: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub timezone: Option<String>,
    pub is_recurring: Option<bool>,
    pub rrule: Option<String>,
    pub base_capacity: Option<u32>,
    pub hosts: Option<Vec<HostRef>>,
    pub location_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub extra: Option<Map<String, JsonValue>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteScheduleQuery {
    pub schedule_id: String,
}
