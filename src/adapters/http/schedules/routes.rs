//! Routes for schedule endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_schedule, delete_schedule, get_schedules, update_schedule};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_schedules)
            .post(create_schedule)
            .patch(update_schedule)
            .delete(delete_schedule),
    )
}
