//! HTTP handlers for session endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::handlers::sessions::SessionQuery;
use crate::domain::foundation::{DomainError, ErrorCode, SessionId};
use crate::domain::scheduling::{ScheduleType, SessionFilter};

use super::super::error::error_response;
use super::super::identity::Tenant;
use super::super::AppState;
use super::dto::SessionsQuery;

fn filter_from(query: &SessionsQuery) -> Result<SessionFilter, DomainError> {
    let mut filter = SessionFilter::default();

    if let Some(raw) = &query.program_id {
        let mut programs = Vec::new();
        for part in raw.split(',') {
            programs.push(part.trim().parse()?);
        }
        filter.program_ids = Some(programs);
    }
    if let Some(raw) = &query.schedule_type {
        filter.schedule_type = Some(match raw.as_str() {
            "SESSION" => ScheduleType::Session,
            "BLOCK" => ScheduleType::Block,
            other => {
                return Err(DomainError::bad_input(
                    "type",
                    format!("'{}' is not a schedule type", other),
                ))
            }
        });
    }
    if let Some(raw) = &query.host_id {
        filter.host_id = Some(raw.parse()?);
    }
    if let Some(raw) = &query.location_id {
        filter.location_id = Some(raw.parse()?);
    }
    if let Some(raw) = &query.start_time {
        filter.start_time = Some(SessionFilter::parse_time(raw)?);
    }
    if let Some(raw) = &query.end_time {
        filter.end_time = Some(SessionFilter::parse_time(raw)?);
    }
    Ok(filter)
}

/// GET /scheduling/sessions?sessionId= | ?startDate=&endDate=[&filters]
pub async fn get_sessions(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<SessionsQuery>,
) -> Response {
    // Single-session mode.
    if let Some(raw) = &query.session_id {
        let session_id = match raw.parse::<SessionId>() {
            Ok(id) => id,
            Err(e) => return error_response(&e),
        };
        return match state.sessions.get_session(&tenant, &session_id).await {
            Ok(Some(session)) => (StatusCode::OK, Json(session)).into_response(),
            Ok(None) => error_response(&DomainError::not_found(
                ErrorCode::SessionNotFound,
                "Session",
                &session_id,
            )),
            Err(e) => error_response(&e),
        };
    }

    let (Some(start_date), Some(end_date)) = (query.start_date, query.end_date) else {
        return error_response(&DomainError::bad_input(
            "startDate",
            "startDate and endDate are required without sessionId",
        ));
    };
    let filter = match filter_from(&query) {
        Ok(f) => f,
        Err(e) => return error_response(&e),
    };

    match state
        .sessions
        .query(SessionQuery {
            tenant_id: tenant,
            start_date,
            end_date,
            filter,
        })
        .await
    {
        Ok(sessions) => (StatusCode::OK, Json(sessions)).into_response(),
        Err(e) => error_response(&e),
    }
}
