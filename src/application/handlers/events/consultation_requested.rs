//! Worker for `appointment.consultation_requested` events.
//!
//! Consultations are lead-driven: the lead id becomes the booking subject
//! with `subjectType = LEAD`, and results are emitted on the appointment
//! detail types.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};

use crate::domain::booking::{
    detail_types, AppointmentFailedDetail, AppointmentScheduledDetail,
};
use crate::domain::foundation::{
    DomainError, ErrorCode, EventEnvelope, SessionId, SubjectId, TenantId,
};
use crate::ports::{EventHandler, EventPublisher};

use super::super::booking::{CreateBookingCommand, CreateBookingHandler};
use super::super::sessions::QuerySessionsHandler;
use super::session_details;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConsultationRequestedDetail {
    tenant_id: String,
    #[serde(default)]
    channel_id: Option<String>,
    lead_id: String,
    #[serde(default)]
    goal_id: Option<String>,
    #[serde(default)]
    appointment_type: Option<String>,
    scheduling_data: SchedulingData,
    #[serde(default)]
    contact_info: Option<JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SchedulingData {
    session_id: String,
    #[serde(flatten)]
    rest: Map<String, JsonValue>,
}

/// Consumes consultation-request events and emits scheduled/failed results.
pub struct ConsultationRequestedWorker {
    create_booking: Arc<CreateBookingHandler>,
    sessions: Arc<QuerySessionsHandler>,
    publisher: Arc<dyn EventPublisher>,
    /// `source` stamped on outbound envelopes.
    source: String,
}

impl ConsultationRequestedWorker {
    pub fn new(
        create_booking: Arc<CreateBookingHandler>,
        sessions: Arc<QuerySessionsHandler>,
        publisher: Arc<dyn EventPublisher>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            create_booking,
            sessions,
            publisher,
            source: source.into(),
        }
    }

    async fn process(
        &self,
        detail: &ConsultationRequestedDetail,
    ) -> Result<AppointmentScheduledDetail, DomainError> {
        let tenant_id = TenantId::new(detail.tenant_id.clone())?;
        let lead_id = SubjectId::new(detail.lead_id.clone())?;
        let session_id: SessionId = detail.scheduling_data.session_id.parse()?;

        let session = self
            .sessions
            .get_session(&tenant_id, &session_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(ErrorCode::SessionNotFound, "Session", &session_id)
            })?;

        let mut cmd = CreateBookingCommand::new(tenant_id.clone(), session_id, lead_id.clone());
        cmd.subject_type = Some("LEAD".to_string());
        cmd.source = Some("event".to_string());
        if let Some(goal_id) = &detail.goal_id {
            cmd.extra.insert("goalId".to_string(), JsonValue::String(goal_id.clone()));
        }
        if let Some(appointment_type) = &detail.appointment_type {
            cmd.extra.insert(
                "appointmentType".to_string(),
                JsonValue::String(appointment_type.clone()),
            );
        }
        if let Some(contact_info) = &detail.contact_info {
            cmd.extra.insert("contactInfo".to_string(), contact_info.clone());
        }
        for (key, value) in &detail.scheduling_data.rest {
            cmd.extra.entry(key.clone()).or_insert_with(|| value.clone());
        }

        let outcome = self.create_booking.handle(cmd).await?;
        Ok(AppointmentScheduledDetail {
            tenant_id,
            channel_id: detail.channel_id.clone(),
            booking_id: outcome.booking().booking_id.clone(),
            lead_id,
            appointment_type: detail.appointment_type.clone(),
            session_details: session_details(&session),
        })
    }

    async fn emit(&self, detail_type: &str, detail: JsonValue) {
        let envelope = EventEnvelope::new(self.source.clone(), detail_type, detail);
        if let Err(e) = self.publisher.publish(envelope).await {
            tracing::error!(error = %e, detail_type, "failed to publish appointment result event");
        }
    }
}

#[async_trait]
impl EventHandler for ConsultationRequestedWorker {
    async fn handle(&self, envelope: EventEnvelope) -> Result<(), DomainError> {
        let detail: ConsultationRequestedDetail =
            match serde_json::from_value(envelope.detail.clone()) {
                Ok(d) => d,
                Err(e) => {
                    let failed = AppointmentFailedDetail {
                        tenant_id: envelope
                            .detail
                            .get("tenantId")
                            .and_then(|v| v.as_str())
                            .and_then(|s| TenantId::new(s).ok())
                            .unwrap_or_else(|| TenantId::new("unknown").expect("valid literal")),
                        channel_id: envelope
                            .detail
                            .get("channelId")
                            .and_then(|v| v.as_str())
                            .map(String::from),
                        session_id: None,
                        error: format!("invalid consultation request: {}", e),
                    };
                    self.emit(
                        detail_types::APPOINTMENT_FAILED,
                        serde_json::to_value(&failed).expect("serializable detail"),
                    )
                    .await;
                    return Ok(());
                }
            };

        match self.process(&detail).await {
            Ok(scheduled) => {
                self.emit(
                    detail_types::APPOINTMENT_SCHEDULED,
                    serde_json::to_value(&scheduled).expect("serializable detail"),
                )
                .await;
            }
            Err(e) => {
                let failed = AppointmentFailedDetail {
                    tenant_id: TenantId::new(detail.tenant_id.clone())
                        .unwrap_or_else(|_| TenantId::new("unknown").expect("valid literal")),
                    channel_id: detail.channel_id.clone(),
                    session_id: Some(detail.scheduling_data.session_id.clone()),
                    error: e.message,
                };
                self.emit(
                    detail_types::APPOINTMENT_FAILED,
                    serde_json::to_value(&failed).expect("serializable detail"),
                )
                .await;
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ConsultationRequestedWorker"
    }
}
