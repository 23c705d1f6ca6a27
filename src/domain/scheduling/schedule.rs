//! Schedule entity - a time pattern, possibly recurring.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::domain::foundation::{
    DomainError, ErrorCode, HostId, LocationId, ProgramId, ScheduleId, TenantId, Timestamp,
};
use crate::domain::localtime;
use crate::domain::recurrence::RecurrenceRule;

/// Whether a schedule produces bookable sessions or blocks time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleType {
    #[serde(rename = "SESSION")]
    Session,
    #[serde(rename = "BLOCK")]
    Block,
}

/// A provider or resource assigned to a session (instructor, doctor, room).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostRef {
    pub id: HostId,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// A time pattern. `start`/`end` are local wall-clock datetimes in
/// `timezone`; their duration is the template for every occurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    pub tenant_id: TenantId,
    pub schedule_id: ScheduleId,
    #[serde(rename = "type")]
    pub schedule_type: ScheduleType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program_id: Option<ProgramId>,
    pub start: String,
    pub end: String,
    pub timezone: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,
    /// None means unlimited. Ignored for BLOCK schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_capacity: Option<u32>,
    /// Ordered; the first host is the primary.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hosts: Vec<HostRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Extension envelope for caller-defined fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, JsonValue>,
}

impl Schedule {
    /// Validates the pattern: known zone, parseable template, positive
    /// duration, rule profile, and SESSION/program coupling.
    pub fn validate(&self) -> Result<(), DomainError> {
        let tz = self.tz()?;
        let start = localtime::parse_local(&self.start, tz)?;
        let end = localtime::parse_local(&self.end, tz)?;
        if end <= start {
            return Err(DomainError::bad_input("end", "schedule end must be after start"));
        }

        if self.schedule_type == ScheduleType::Session && self.program_id.is_none() {
            return Err(DomainError::bad_input(
                "programId",
                "SESSION schedules require a programId",
            ));
        }

        if self.is_recurring {
            let rule = self.rrule.as_deref().ok_or_else(|| {
                DomainError::bad_input("rrule", "recurring schedules require an rrule")
            })?;
            RecurrenceRule::parse(rule)?;
        }

        Ok(())
    }

    pub fn tz(&self) -> Result<Tz, DomainError> {
        localtime::parse_timezone(&self.timezone)
    }

    /// The template start as an absolute instant.
    pub fn start_instant(&self) -> Result<DateTime<Utc>, DomainError> {
        localtime::parse_local(&self.start, self.tz()?)
    }

    /// The template end as an absolute instant.
    pub fn end_instant(&self) -> Result<DateTime<Utc>, DomainError> {
        localtime::parse_local(&self.end, self.tz()?)
    }

    /// The parsed recurrence rule, if the schedule is recurring.
    pub fn recurrence(&self) -> Result<Option<RecurrenceRule>, DomainError> {
        if !self.is_recurring {
            return Ok(None);
        }
        let rule = self.rrule.as_deref().ok_or_else(|| {
            DomainError::new(ErrorCode::UnsupportedRule, "recurring schedule has no rule")
        })?;
        RecurrenceRule::parse(rule).map(Some)
    }

    /// The first host, used for host-indexed lookup.
    pub fn primary_host(&self) -> Option<&HostId> {
        self.hosts.first().map(|h| &h.id)
    }
}
