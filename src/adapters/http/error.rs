//! Domain error to HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, ErrorCode};

/// Error body: `{"error": "<message>"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Status for an error code, per the error taxonomy.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::BadInput
        | ErrorCode::BadDateTime
        | ErrorCode::BadCoordinates
        | ErrorCode::UnsupportedRule
        | ErrorCode::RangeTooLarge
        | ErrorCode::AlreadyCancelled
        | ErrorCode::AlreadyCheckedIn
        | ErrorCode::TooEarly
        | ErrorCode::TooLate
        | ErrorCode::OutOfRange => StatusCode::BAD_REQUEST,

        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::ProgramNotFound
        | ErrorCode::LocationNotFound
        | ErrorCode::ScheduleNotFound
        | ErrorCode::ExceptionNotFound
        | ErrorCode::SessionNotFound
        | ErrorCode::BookingNotFound => StatusCode::NOT_FOUND,

        ErrorCode::AlreadyBooked | ErrorCode::AtCapacity | ErrorCode::StoreConflict => {
            StatusCode::CONFLICT
        }

        ErrorCode::CounterUnderflow
        | ErrorCode::StoreUnavailable
        | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders a domain error as its HTTP response.
pub fn error_response(err: &DomainError) -> Response {
    let status = status_for(err.code);
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!(code = %err.code, message = %err.message, "request failed");
    }
    (status, Json(ErrorResponse::new(err.message.clone()))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_expected_statuses() {
        assert_eq!(status_for(ErrorCode::BadInput), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::UnsupportedRule), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::RangeTooLarge), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::OutOfRange), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorCode::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(status_for(ErrorCode::SessionNotFound), StatusCode::NOT_FOUND);
        assert_eq!(status_for(ErrorCode::AtCapacity), StatusCode::CONFLICT);
        assert_eq!(status_for(ErrorCode::AlreadyBooked), StatusCode::CONFLICT);
        assert_eq!(
            status_for(ErrorCode::CounterUnderflow),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
