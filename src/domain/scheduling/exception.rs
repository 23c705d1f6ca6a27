//! Per-date schedule overrides.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::domain::foundation::{DomainError, LocationId, ScheduleId, TenantId, Timestamp};

use super::schedule::HostRef;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExceptionType {
    #[serde(rename = "CANCELLED")]
    Cancelled,
    #[serde(rename = "OVERRIDE")]
    Override,
}

/// A per-date override, keyed by the occurrence's local wall-clock date in
/// the schedule's timezone. For OVERRIDE, absent fields fall through to the
/// schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleException {
    pub tenant_id: TenantId,
    pub schedule_id: ScheduleId,
    pub occurrence_date: NaiveDate,
    #[serde(rename = "type")]
    pub exception_type: ExceptionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_capacity: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_hosts: Option<Vec<HostRef>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub override_location_id: Option<LocationId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Extension envelope for caller-defined fields.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, JsonValue>,
}

impl ScheduleException {
    pub fn cancelled(
        tenant_id: TenantId,
        schedule_id: ScheduleId,
        occurrence_date: NaiveDate,
    ) -> Self {
        let now = Timestamp::now();
        Self {
            tenant_id,
            schedule_id,
            occurrence_date,
            exception_type: ExceptionType::Cancelled,
            override_start: None,
            override_end: None,
            override_capacity: None,
            override_hosts: None,
            override_location_id: None,
            reason: None,
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    /// Overrides carry at least one changed field; a bare OVERRIDE is a
    /// caller mistake.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.exception_type == ExceptionType::Override
            && self.override_start.is_none()
            && self.override_end.is_none()
            && self.override_capacity.is_none()
            && self.override_hosts.is_none()
            && self.override_location_id.is_none()
        {
            return Err(DomainError::bad_input(
                "type",
                "OVERRIDE exceptions must override at least one field",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancelled_constructor_sets_type() {
        let e = ScheduleException::cancelled(
            TenantId::new("t1").unwrap(),
            ScheduleId::new("sched_x").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
        );
        assert_eq!(e.exception_type, ExceptionType::Cancelled);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn bare_override_is_rejected() {
        let mut e = ScheduleException::cancelled(
            TenantId::new("t1").unwrap(),
            ScheduleId::new("sched_x").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
        );
        e.exception_type = ExceptionType::Override;
        assert!(e.validate().is_err());

        e.override_capacity = Some(3);
        assert!(e.validate().is_ok());
    }

    #[test]
    fn occurrence_date_serializes_as_plain_date() {
        let e = ScheduleException::cancelled(
            TenantId::new("t1").unwrap(),
            ScheduleId::new("sched_x").unwrap(),
            NaiveDate::from_ymd_opt(2025, 1, 8).unwrap(),
        );
        let value = serde_json::to_value(&e).unwrap();
        assert_eq!(value["occurrenceDate"], "2025-01-08");
        assert_eq!(value["type"], "CANCELLED");
    }
}
