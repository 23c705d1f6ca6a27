//! Routes for booking endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_booking, delete_booking, get_bookings};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_bookings).post(create_booking).delete(delete_booking),
    )
}
