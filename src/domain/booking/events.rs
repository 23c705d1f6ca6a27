//! Wire payloads for the booking event surface.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, LocationId, SessionId, SubjectId, TenantId};

/// Routing keys on the event bus.
pub mod detail_types {
    // Inbound.
    pub const BOOKING_REQUESTED: &str = "scheduling.booking_requested";
    pub const CONSULTATION_REQUESTED: &str = "appointment.consultation_requested";

    // Outbound.
    pub const BOOKING_CONFIRMED: &str = "scheduling.booking_confirmed";
    pub const BOOKING_FAILED: &str = "scheduling.booking_failed";
    pub const APPOINTMENT_SCHEDULED: &str = "appointment.scheduled";
    pub const APPOINTMENT_FAILED: &str = "appointment.failed";
}

/// Human-oriented session block attached to success events.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetails {
    pub session_id: SessionId,
    pub date: String,
    /// Wall-clock start in the session's zone.
    pub start_time: String,
    /// Wall-clock end in the session's zone.
    pub end_time: String,
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<LocationId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingConfirmedDetail {
    pub tenant_id: TenantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub booking_id: BookingId,
    pub subject_id: SubjectId,
    pub session_details: SessionDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFailedDetail {
    pub tenant_id: TenantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub error: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentScheduledDetail {
    pub tenant_id: TenantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    pub booking_id: BookingId,
    pub lead_id: SubjectId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appointment_type: Option<String>,
    pub session_details: SessionDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentFailedDetail {
    pub tenant_id: TenantId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmed_detail_serializes_session_block() {
        let detail = BookingConfirmedDetail {
            tenant_id: TenantId::new("t1").unwrap(),
            channel_id: Some("chan_1".to_string()),
            booking_id: BookingId::generate(),
            subject_id: SubjectId::new("member_1").unwrap(),
            session_details: SessionDetails {
                session_id: "sched_x#2025-01-06".parse().unwrap(),
                date: "2025-01-06".to_string(),
                start_time: "2025-01-06T07:00:00".to_string(),
                end_time: "2025-01-06T08:00:00".to_string(),
                timezone: "America/New_York".to_string(),
                location_id: None,
            },
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["sessionDetails"]["startTime"], "2025-01-06T07:00:00");
        assert_eq!(value["sessionDetails"]["sessionId"], "sched_x#2025-01-06");
        assert_eq!(value["channelId"], "chan_1");
    }
}
