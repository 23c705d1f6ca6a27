//! Session read path.

mod query_sessions;

pub use query_sessions::{QuerySessionsHandler, SessionQuery};
