//! Routes for schedule exception endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::{create_exception, delete_exception, get_exceptions, update_exception};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(get_exceptions)
            .post(create_exception)
            .patch(update_exception)
            .delete(delete_exception),
    )
}
