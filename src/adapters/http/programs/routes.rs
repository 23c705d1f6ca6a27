//! Routes for program endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_program, delete_program, get_programs, update_program};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_programs)
            .post(create_program)
            .patch(update_program)
            .delete(delete_program),
    )
}
