//! In-memory store adapter.
//!
//! The reference implementation of the store ports: seven logical tables
//! behind one mutex, so the multi-entity booking transactions run inside a
//! single critical section - the in-process equivalent of the conditional
//! transactional writes the production key-value store provides.
//!
//! # Panics
//!
//! Methods panic if the internal lock is poisoned. That is acceptable for a
//! reference store; a poisoned lock means a prior panic already took the
//! process down a broken path.

mod attendance;
mod bookings;
mod exceptions;
mod ledger;
mod locations;
mod programs;
mod schedules;
mod summaries;

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDate;

use crate::domain::attendance::AttendanceRecord;
use crate::domain::booking::Booking;
use crate::domain::foundation::{
    BookingId, LocationId, ProgramId, ScheduleId, SessionId, TenantId,
};
use crate::domain::scheduling::{
    Location, Program, Schedule, ScheduleException, SessionSummary,
};

#[derive(Default)]
pub(crate) struct Tables {
    pub programs: BTreeMap<(TenantId, ProgramId), Program>,
    pub locations: BTreeMap<(TenantId, LocationId), Location>,
    pub schedules: BTreeMap<(TenantId, ScheduleId), Schedule>,
    pub exceptions: BTreeMap<(TenantId, ScheduleId, NaiveDate), ScheduleException>,
    pub bookings: BTreeMap<(TenantId, SessionId, BookingId), Booking>,
    /// Tenant-wide booking index: lookup by id without scanning sessions.
    pub booking_index: HashMap<(TenantId, BookingId), SessionId>,
    pub summaries: BTreeMap<(TenantId, SessionId), SessionSummary>,
    pub attendance: BTreeMap<(TenantId, SessionId, BookingId), AttendanceRecord>,
}

/// Shared in-memory store. Clones share the same tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Tables> {
        self.inner.lock().expect("MemoryStore: tables lock poisoned")
    }
}
