//! HTTP DTOs for schedule exception endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::domain::scheduling::{ExceptionType, HostRef};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExceptionQuery {
    pub schedule_id: String,
    pub occurrence_date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PutExceptionRequest {
    pub schedule_id: String,
    pub occurrence_date: NaiveDate,
    #[serde(rename = "type")]
    pub exception_type: ExceptionType,
    pub override_start: Option<String>,
    pub override_end: Option<String>,
    pub override_capacity: Option<u32>,
    pub override_hosts: Option<Vec<HostRef>>,
    pub override_location_id: Option<String>,
    pub reason: Option<String>,
    #[serde(default)]
    pub extra: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteExceptionQuery {
    pub schedule_id: String,
    pub occurrence_date: NaiveDate,
}
