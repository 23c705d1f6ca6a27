//! HTTP handlers for schedule exception endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, ScheduleId, TenantId, Timestamp};
use crate::domain::scheduling::ScheduleException;

use super::super::error::error_response;
use super::super::identity::Tenant;
use super::super::AppState;
use super::dto::{DeleteExceptionQuery, ExceptionQuery, PutExceptionRequest};

/// GET /scheduling/exceptions?scheduleId=[&occurrenceDate=|&startDate=&endDate=]
pub async fn get_exceptions(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<ExceptionQuery>,
) -> Response {
    let schedule_id = match query.schedule_id.parse::<ScheduleId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    if let Some(date) = query.occurrence_date {
        return match state.exceptions.get(&tenant, &schedule_id, date).await {
            Ok(Some(exception)) => (StatusCode::OK, Json(exception)).into_response(),
            Ok(None) => error_response(&DomainError::not_found(
                ErrorCode::ExceptionNotFound,
                "Exception",
                format!("{}#{}", schedule_id, date),
            )),
            Err(e) => error_response(&e),
        };
    }

    // Default to an open listing window when bounds are omitted.
    let start = query.start_date.unwrap_or(NaiveDate::MIN);
    let end = query.end_date.unwrap_or(NaiveDate::MAX);
    match state
        .exceptions
        .list_in_range(&tenant, &schedule_id, start, end)
        .await
    {
        Ok(exceptions) => (StatusCode::OK, Json(exceptions)).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn upsert_exception(
    state: &AppState,
    tenant: TenantId,
    req: PutExceptionRequest,
    created: StatusCode,
) -> Response {
    let schedule_id = match req.schedule_id.parse::<ScheduleId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    // The parent schedule must exist; exceptions are its children.
    match state.schedules.get(&tenant, &schedule_id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return error_response(&DomainError::not_found(
                ErrorCode::ScheduleNotFound,
                "Schedule",
                &schedule_id,
            ))
        }
        Err(e) => return error_response(&e),
    }

    let override_location_id = match req.override_location_id.map(|s| s.parse()).transpose() {
        Ok(l) => l,
        Err(e) => return error_response(&e),
    };

    let prior = match state
        .exceptions
        .get(&tenant, &schedule_id, req.occurrence_date)
        .await
    {
        Ok(prior) => prior,
        Err(e) => return error_response(&e),
    };

    let now = Timestamp::now();
    let exception = ScheduleException {
        tenant_id: tenant,
        schedule_id,
        occurrence_date: req.occurrence_date,
        exception_type: req.exception_type,
        override_start: req.override_start,
        override_end: req.override_end,
        override_capacity: req.override_capacity,
        override_hosts: req.override_hosts,
        override_location_id,
        reason: req.reason,
        created_at: prior.as_ref().map_or(now, |p| p.created_at),
        updated_at: now,
        extra: req.extra,
    };
    if let Err(e) = exception.validate() {
        return error_response(&e);
    }

    match state.exceptions.put(&exception).await {
        Ok(()) => (created, Json(exception)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /scheduling/exceptions
pub async fn create_exception(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<PutExceptionRequest>,
) -> Response {
    upsert_exception(&state, tenant, req, StatusCode::CREATED).await
}

/// PATCH /scheduling/exceptions (key in body)
pub async fn update_exception(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<PutExceptionRequest>,
) -> Response {
    upsert_exception(&state, tenant, req, StatusCode::OK).await
}

/// DELETE /scheduling/exceptions?scheduleId=&occurrenceDate=
pub async fn delete_exception(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<DeleteExceptionQuery>,
) -> Response {
    let schedule_id = match query.schedule_id.parse::<ScheduleId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state
        .exceptions
        .get(&tenant, &schedule_id, query.occurrence_date)
        .await
    {
        Ok(Some(exception)) => {
            match state
                .exceptions
                .delete(&tenant, &schedule_id, query.occurrence_date)
                .await
            {
                Ok(()) => (StatusCode::OK, Json(exception)).into_response(),
                Err(e) => error_response(&e),
            }
        }
        Ok(None) => error_response(&DomainError::not_found(
            ErrorCode::ExceptionNotFound,
            "Exception",
            format!("{}#{}", schedule_id, query.occurrence_date),
        )),
        Err(e) => error_response(&e),
    }
}
