//! Event bus adapters.
//!
//! The production transport is an external collaborator; this module holds
//! the in-memory bus used by tests and local development.

mod in_memory;

pub use in_memory::InMemoryEventBus;
