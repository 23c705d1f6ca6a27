//! Request-scoped handlers. Each holds its port dependencies behind `Arc`
//! and exposes a single entry point.

pub mod attendance;
pub mod booking;
pub mod events;
pub mod sessions;
