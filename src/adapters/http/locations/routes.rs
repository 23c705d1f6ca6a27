//! Routes for location endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_location, delete_location, get_locations, update_location};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_locations)
            .post(create_location)
            .patch(update_location)
            .delete(delete_location),
    )
}
