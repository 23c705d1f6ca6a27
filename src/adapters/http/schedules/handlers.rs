//! HTTP handlers for schedule endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, ScheduleId, Timestamp};
use crate::domain::scheduling::Schedule;

use super::super::error::error_response;
use super::super::identity::Tenant;
use super::super::AppState;
use super::dto::{
    CreateScheduleRequest, DeleteScheduleQuery, ScheduleQuery, UpdateScheduleRequest,
};

/// GET /scheduling/schedules[?scheduleId=][&programId=]
pub async fn get_schedules(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<ScheduleQuery>,
) -> Response {
    if let Some(raw) = &query.schedule_id {
        let id = match raw.parse::<ScheduleId>() {
            Ok(id) => id,
            Err(e) => return error_response(&e),
        };
        return match state.schedules.get(&tenant, &id).await {
            Ok(Some(schedule)) => (StatusCode::OK, Json(schedule)).into_response(),
            Ok(None) => error_response(&DomainError::not_found(
                ErrorCode::ScheduleNotFound,
                "Schedule",
                &id,
            )),
            Err(e) => error_response(&e),
        };
    }

    let result = match &query.program_id {
        Some(raw) => match raw.parse::<ProgramId>() {
            Ok(program) => state.schedules.list_by_programs(&tenant, &[program]).await,
            Err(e) => return error_response(&e),
        },
        None => state.schedules.list(&tenant).await,
    };
    match result {
        Ok(schedules) => (StatusCode::OK, Json(schedules)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /scheduling/schedules
pub async fn create_schedule(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<CreateScheduleRequest>,
) -> Response {
    let id = match req
        .schedule_id
        .map_or_else(|| ScheduleId::new(Uuid::new_v4().to_string()), ScheduleId::new)
    {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let program_id = match req.program_id.map(ProgramId::new).transpose() {
        Ok(p) => p,
        Err(e) => return error_response(&e),
    };
    let location_id = match req.location_id.map(|s| s.parse()).transpose() {
        Ok(l) => l,
        Err(e) => return error_response(&e),
    };

    let now = Timestamp::now();
    let schedule = Schedule {
        tenant_id: tenant,
        schedule_id: id,
        schedule_type: req.schedule_type,
        program_id,
        start: req.start,
        end: req.end,
        timezone: req.timezone,
        is_recurring: req.is_recurring,
        rrule: req.rrule,
        base_capacity: req.base_capacity,
        hosts: req.hosts,
        location_id,
        tags: req.tags,
        created_at: now,
        updated_at: now,
        extra: req.extra,
    };
    if let Err(e) = schedule.validate() {
        return error_response(&e);
    }

    match state.schedules.put(&schedule).await {
        Ok(()) => (StatusCode::CREATED, Json(schedule)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PATCH /scheduling/schedules (id in body)
pub async fn update_schedule(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<UpdateScheduleRequest>,
) -> Response {
    let id = match req.schedule_id.parse::<ScheduleId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    let mut schedule = match state.schedules.get(&tenant, &id).await {
        Ok(Some(s)) => s,
        Ok(None) => {
            return error_response(&DomainError::not_found(
                ErrorCode::ScheduleNotFound,
                "Schedule",
                &id,
            ))
        }
        Err(e) => return error_response(&e),
    };

    if let Some(schedule_type) = req.schedule_type {
        schedule.schedule_type = schedule_type;
    }
    if let Some(raw) = req.program_id {
        match raw.parse::<ProgramId>() {
            Ok(p) => schedule.program_id = Some(p),
            Err(e) => return error_response(&e),
        }
    }
    if let Some(start) = req.start {
        schedule.start = start;
    }
    if let Some(end) = req.end {
        schedule.end = end;
    }
    if let Some(timezone) = req.timezone {
        schedule.timezone = timezone;
    }
    if let Some(is_recurring) = req.is_recurring {
        schedule.is_recurring = is_recurring;
    }
    if let Some(rrule) = req.rrule {
        schedule.rrule = Some(rrule);
    }
    if let Some(base_capacity) = req.base_capacity {
        schedule.base_capacity = Some(base_capacity);
    }
    if let Some(hosts) = req.hosts {
        schedule.hosts = hosts;
    }
    if let Some(raw) = req.location_id {
        match raw.parse() {
            Ok(l) => schedule.location_id = Some(l),
            Err(e) => return error_response(&e),
        }
    }
    if let Some(tags) = req.tags {
        schedule.tags = tags;
    }
    if let Some(extra) = req.extra {
        schedule.extra = extra;
    }
    schedule.updated_at = Timestamp::now();

    if let Err(e) = schedule.validate() {
        return error_response(&e);
    }

    match state.schedules.put(&schedule).await {
        Ok(()) => (StatusCode::OK, Json(schedule)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// DELETE /scheduling/schedules?scheduleId=
pub async fn delete_schedule(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Query(query): Query<DeleteScheduleQuery>,
) -> Response {
    let id = match query.schedule_id.parse::<ScheduleId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state.schedules.get(&tenant, &id).await {
        Ok(Some(schedule)) => match state.schedules.delete(&tenant, &id).await {
            Ok(()) => (StatusCode::OK, Json(schedule)).into_response(),
            Err(e) => error_response(&e),
        },
        Ok(None) => error_response(&DomainError::not_found(
            ErrorCode::ScheduleNotFound,
            "Schedule",
            &id,
        )),
        Err(e) => error_response(&e),
    }
}
