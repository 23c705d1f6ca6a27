//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
///
/// The code is the semantic identity of a failure; the HTTP layer and the
/// event workers map codes to their respective surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    BadInput,
    BadDateTime,
    BadCoordinates,
    UnsupportedRule,
    RangeTooLarge,

    // Not found errors
    ProgramNotFound,
    LocationNotFound,
    ScheduleNotFound,
    ExceptionNotFound,
    SessionNotFound,
    BookingNotFound,

    // Ownership errors
    Forbidden,

    // Booking lifecycle errors
    AlreadyBooked,
    AlreadyCancelled,
    AtCapacity,
    CounterUnderflow,

    // Check-in errors
    AlreadyCheckedIn,
    TooEarly,
    TooLate,
    OutOfRange,

    // Store errors
    StoreConflict,
    StoreUnavailable,
    InternalError,
}

impl ErrorCode {
    /// Whether a client may retry the failed operation unchanged.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::AtCapacity
                | ErrorCode::TooEarly
                | ErrorCode::TooLate
                | ErrorCode::OutOfRange
                | ErrorCode::StoreConflict
                | ErrorCode::StoreUnavailable
                | ErrorCode::InternalError
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::BadInput => "BAD_INPUT",
            ErrorCode::BadDateTime => "BAD_DATE_TIME",
            ErrorCode::BadCoordinates => "BAD_COORDINATES",
            ErrorCode::UnsupportedRule => "UNSUPPORTED_RULE",
            ErrorCode::RangeTooLarge => "RANGE_TOO_LARGE",
            ErrorCode::ProgramNotFound => "PROGRAM_NOT_FOUND",
            ErrorCode::LocationNotFound => "LOCATION_NOT_FOUND",
            ErrorCode::ScheduleNotFound => "SCHEDULE_NOT_FOUND",
            ErrorCode::ExceptionNotFound => "EXCEPTION_NOT_FOUND",
            ErrorCode::SessionNotFound => "SESSION_NOT_FOUND",
            ErrorCode::BookingNotFound => "BOOKING_NOT_FOUND",
            ErrorCode::Forbidden => "FORBIDDEN",
            ErrorCode::AlreadyBooked => "ALREADY_BOOKED",
            ErrorCode::AlreadyCancelled => "ALREADY_CANCELLED",
            ErrorCode::AtCapacity => "AT_CAPACITY",
            ErrorCode::CounterUnderflow => "COUNTER_UNDERFLOW",
            ErrorCode::AlreadyCheckedIn => "ALREADY_CHECKED_IN",
            ErrorCode::TooEarly => "TOO_EARLY",
            ErrorCode::TooLate => "TOO_LATE",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::StoreConflict => "STORE_CONFLICT",
            ErrorCode::StoreUnavailable => "STORE_UNAVAILABLE",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn bad_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadInput, message).with_detail("field", field.into())
    }

    /// Creates a not-found error with the standard message shape.
    pub fn not_found(code: ErrorCode, what: &str, id: impl fmt::Display) -> Self {
        Self::new(code, format!("{} not found: {}", what, id))
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}
