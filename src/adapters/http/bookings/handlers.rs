//! HTTP handlers for booking endpoints.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::application::handlers::booking::{
    BookingOutcome, CancelBookingCommand, CreateBookingCommand,
};
use crate::domain::booking::BookingStatus;
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, SessionId, SubjectId};

use super::super::error::error_response;
use super::super::identity::{Subject, Tenant};
use super::super::AppState;
use super::dto::{BookingsQuery, CreateBookingRequest, DeleteBookingQuery};

fn parse_status(raw: &str) -> Result<BookingStatus, DomainError> {
    match raw {
        "CONFIRMED" => Ok(BookingStatus::Confirmed),
        "CANCELLED" => Ok(BookingStatus::Cancelled),
        "WAITLIST" => Ok(BookingStatus::Waitlist),
        other => Err(DomainError::bad_input(
            "status",
            format!("'{}' is not a booking status", other),
        )),
    }
}

/// GET /scheduling/bookings[?sessionId=][?limit=&status=]
pub async fn get_bookings(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Subject(subject): Subject,
    Query(query): Query<BookingsQuery>,
) -> Response {
    if let Some(raw) = &query.session_id {
        let session_id = match raw.parse::<SessionId>() {
            Ok(id) => id,
            Err(e) => return error_response(&e),
        };
        return match state.bookings.list_by_session(&tenant, &session_id).await {
            Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
            Err(e) => error_response(&e),
        };
    }

    // Subject-scoped listing.
    let Some(subject) = subject else {
        return error_response(&DomainError::bad_input(
            "subjectId",
            "subjectId is required without sessionId",
        ));
    };
    let status = match query.status.as_deref().map(parse_status).transpose() {
        Ok(s) => s,
        Err(e) => return error_response(&e),
    };
    match state
        .bookings
        .list_by_subject(&tenant, &subject, status, query.limit)
        .await
    {
        Ok(bookings) => (StatusCode::OK, Json(bookings)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// POST /scheduling/bookings
pub async fn create_booking(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Subject(subject): Subject,
    Json(req): Json<CreateBookingRequest>,
) -> Response {
    let session_id = match req.session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    // Claim and header take precedence; the body field is the last fallback.
    let subject_id = match subject.map(Ok).or_else(|| {
        req.subject_id
            .as_deref()
            .map(|s| s.parse::<SubjectId>())
    }) {
        Some(Ok(s)) => s,
        Some(Err(e)) => return error_response(&e),
        None => {
            return error_response(&DomainError::bad_input(
                "subjectId",
                "subjectId is required",
            ))
        }
    };

    let mut cmd = CreateBookingCommand::new(tenant, session_id, subject_id);
    cmd.subject_type = req.subject_type;
    cmd.source = req.source;
    cmd.notes = req.notes;
    cmd.extra = req.extra;

    match state.create_booking.handle(cmd).await {
        Ok(BookingOutcome::Created(booking)) => {
            (StatusCode::CREATED, Json(booking)).into_response()
        }
        Ok(BookingOutcome::AlreadyBooked(existing)) => error_response(
            &DomainError::new(
                ErrorCode::AlreadyBooked,
                "subject already has an active booking on this session",
            )
            .with_detail("bookingId", existing.booking_id.to_string()),
        ),
        Err(e) => error_response(&e),
    }
}

/// DELETE /scheduling/bookings?bookingId=
pub async fn delete_booking(
    State(state): State<AppState>,
    Tenant(tenant): Tenant,
    Subject(subject): Subject,
    Query(query): Query<DeleteBookingQuery>,
) -> Response {
    let booking_id = match query.booking_id.parse::<BookingId>() {
        Ok(id) => id,
        Err(e) => return error_response(&e),
    };

    match state
        .cancel_booking
        .handle(CancelBookingCommand {
            tenant_id: tenant,
            booking_id,
            requester: subject,
        })
        .await
    {
        Ok(booking) => (StatusCode::OK, Json(booking)).into_response(),
        Err(e) => error_response(&e),
    }
}
