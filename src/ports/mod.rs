//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! domain and the outside world. Adapters implement these ports.
//!
//! ## Store ports
//!
//! - `ProgramRepository` / `LocationRepository` / `ScheduleRepository` /
//!   `ExceptionRepository` - reference-entity persistence
//! - `BookingRepository` - booking queries plus the two multi-entity
//!   transactions that compose the booking write with the capacity ledger
//! - `SummaryReader` - read side of the session counters
//! - `AttendanceRepository` - check-in records
//!
//! ## Event ports
//!
//! - `EventPublisher` - emit envelopes to the bus
//! - `EventSubscriber` / `EventHandler` - inbound delivery
//!
//! ## Ambient ports
//!
//! - `TokenVerifier` - bearer token -> tenant/subject claims
//! - `Clock` - current time indirection

mod attendance_repository;
mod booking_repository;
mod clock;
mod event_bus;
mod exception_repository;
mod identity;
mod location_repository;
mod program_repository;
mod schedule_repository;
mod summary_reader;

pub use attendance_repository::AttendanceRepository;
pub use booking_repository::BookingRepository;
pub use clock::Clock;
pub use event_bus::{EventHandler, EventPublisher, EventSubscriber};
pub use exception_repository::ExceptionRepository;
pub use identity::{Claims, TokenVerifier};
pub use location_repository::LocationRepository;
pub use program_repository::ProgramRepository;
pub use schedule_repository::ScheduleRepository;
pub use summary_reader::SummaryReader;
