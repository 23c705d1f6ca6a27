//! Scheduling domain - reference entities, virtual sessions, and the
//! materialization pipeline that turns a schedule plus its exceptions into
//! addressable session instances.

mod exception;
mod filter;
mod location;
mod materializer;
mod program;
mod schedule;
mod session;

pub use exception::{ExceptionType, ScheduleException};
pub use filter::{validate_window, widened_range, SessionFilter, MAX_WINDOW_DAYS};
pub use location::{Location, DEFAULT_CHECK_IN_RADIUS_METERS};
pub use materializer::{materialize, resolve_capacity};
pub use program::Program;
pub use schedule::{HostRef, Schedule, ScheduleType};
pub use session::{Session, SessionSummary};
