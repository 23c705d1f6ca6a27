//! Bookwell - Multi-tenant scheduling and booking backend.
//!
//! Expands recurring time patterns into virtual session instances,
//! enforces per-session capacity transactionally during booking, and
//! records attendance with GPS proximity and time-window checks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
