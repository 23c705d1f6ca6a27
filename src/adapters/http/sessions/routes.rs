//! Routes for session endpoints.

use axum::routing::get;
use axum::Router;

use super::super::AppState;
use super::handlers::get_sessions;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_sessions))
}
