//! HTTP handlers for attendance endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::handlers::attendance::{CheckInCommand, OverrideAttendanceCommand};
use crate::domain::foundation::{BookingId, DomainError, SessionId, SubjectId};

use super::super::error::error_response;
use super::super::identity::{Subject, Tenant};
use super::super::AppState;
use super::dto::{AttendanceQuery, CheckInRequest, OverrideAttendanceRequest};

/// GET /scheduling/attendance[?sessionId=]
pub async fn get_attendance(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Subject(subject): Subject,
    Query(query): Query<AttendanceQuery>,
) -> Response {
    if let Some(raw) = &query.session_id {
        let session_id = match raw.parse::<SessionId>() {
            Ok(id) => id,
            Err(e) => return error_response(&e),
        };
        return match state.attendance.list_by_session(&tenant, &session_id).await {
            Ok(records) => (StatusCode::OK, Json(records)).into_response(),
            Err(e) => error_response(&e),
        };
    }

    let Some(subject) = subject else {
        return error_response(&DomainError::bad_input(
            "subjectId",
            "subjectId is required without sessionId",
        ));
    };
    match state.attendance.list_by_subject(&tenant, &subject).await {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /scheduling/attendance - GPS/manual check-in.
pub async fn check_in(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Subject(subject): Subject,
    Json(req): Json<CheckInRequest>,
) -> Response {
    let booking_id = match req.booking_id.parse::<BookingId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let requester = match subject.map(Ok).or_else(|| {
        req.subject_id
            .as_deref()
            .map(|s| s.parse::<SubjectId>())
    }) {
        Some(Ok(s)) => Some(s),
        Some(Err(e)) => return error_response(&e),
        None => None,
    };

    match state
        .check_in
        .handle(CheckInCommand {
            tenant_id: tenant,
            booking_id,
            requester,
            lat: req.lat,
            lng: req.lng,
        })
        .await
    {
        Ok(record) => (StatusCode::CREATED, Json(record)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// PATCH /scheduling/attendance - administrative override.
pub async fn override_attendance(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Json(req): Json<OverrideAttendanceRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };
    let booking_id = match req.booking_id.parse::<BookingId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state
        .override_attendance
        .handle(OverrideAttendanceCommand {
            tenant_id: tenant,
            session_id,
            booking_id,
            status: req.status,
        })
        .await
    {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e) => error_response(&e),
    }
}
