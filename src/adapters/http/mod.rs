//! HTTP adapters - the `/scheduling` REST surface.
//!
//! Each resource has its own module with DTOs, handlers, and routes. The
//! router applies tenant/subject resolution and the CORS policy.

pub mod attendance;
pub mod bookings;
pub mod error;
pub mod exceptions;
pub mod identity;
pub mod locations;
pub mod programs;
pub mod schedules;
pub mod sessions;

use std::sync::Arc;

use axum::http::{HeaderName, Method};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::application::handlers::attendance::{CheckInHandler, OverrideAttendanceHandler};
use crate::application::handlers::booking::{CancelBookingHandler, CreateBookingHandler};
use crate::application::handlers::sessions::QuerySessionsHandler;
use crate::ports::{
    AttendanceRepository, BookingRepository, ExceptionRepository, LocationRepository,
    ProgramRepository, ScheduleRepository, TokenVerifier,
};

/// Shared state for all scheduling endpoints.
#[derive(Clone)]
pub struct AppState {
    pub programs: Arc<dyn ProgramRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub schedules: Arc<dyn ScheduleRepository>,
    pub exceptions: Arc<dyn ExceptionRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub attendance: Arc<dyn AttendanceRepository>,
    pub sessions: Arc<QuerySessionsHandler>,
    pub create_booking: Arc<CreateBookingHandler>,
    pub cancel_booking: Arc<CancelBookingHandler>,
    pub check_in: Arc<CheckInHandler>,
    pub override_attendance: Arc<OverrideAttendanceHandler>,
}

/// Builds the `/scheduling` router with identity resolution and CORS.
pub fn router(state: AppState, verifier: Arc<dyn TokenVerifier>) -> Router {
    let api = Router::new()
        .nest("/programs", programs::routes())
        .nest("/locations", locations::routes())
        .nest("/schedules", schedules::routes())
        .nest("/exceptions", exceptions::routes())
        .nest("/sessions", sessions::routes())
        .nest("/bookings", bookings::routes())
        .nest("/attendance", attendance::routes());

    Router::new()
        .nest("/scheduling", api)
        .layer(middleware::from_fn_with_state(
            verifier,
            identity::identity_middleware,
        ))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::OPTIONS,
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([
            HeaderName::from_static("content-type"),
            HeaderName::from_static("authorization"),
            HeaderName::from_static("x-tenant-id"),
            HeaderName::from_static("x-subject-id"),
        ])
}
