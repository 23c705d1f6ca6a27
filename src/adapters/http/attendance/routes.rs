//! Routes for attendance endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{check_in, get_attendance, override_attendance};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_attendance).post(check_in).patch(override_attendance),
    )
}
