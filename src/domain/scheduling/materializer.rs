//! Session materialization: schedule + exceptions + summaries -> sessions.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};

use crate::domain::foundation::{DomainError, SessionId, Timestamp};
use crate::domain::localtime;
use crate::domain::recurrence;

use super::exception::{ExceptionType, ScheduleException};
use super::schedule::{Schedule, ScheduleType};
use super::session::{Session, SessionSummary};

/// The capacity in force on a given date: the OVERRIDE exception's value if
/// present, else the schedule's base capacity. BLOCK schedules have none.
pub fn resolve_capacity(schedule: &Schedule, exception: Option<&ScheduleException>) -> Option<u32> {
    if schedule.schedule_type == ScheduleType::Block {
        return None;
    }
    match exception {
        Some(e) if e.exception_type == ExceptionType::Override => {
            e.override_capacity.or(schedule.base_capacity)
        }
        _ => schedule.base_capacity,
    }
}

/// Materializes the virtual sessions of one schedule over an absolute range.
///
/// The range endpoints are inclusive. `exceptions` is keyed by the local
/// occurrence date; `summaries` supplies the mutable counters for sessions
/// that have seen bookings. The result is a pure function of its inputs and
/// is sorted ascending by absolute start.
pub fn materialize(
    schedule: &Schedule,
    range_start: DateTime<Utc>,
    range_end: DateTime<Utc>,
    exceptions: &HashMap<NaiveDate, ScheduleException>,
    summaries: &HashMap<SessionId, SessionSummary>,
) -> Result<Vec<Session>, DomainError> {
    let tz = schedule.tz()?;
    let template_start = schedule.start_instant()?;
    let template_end = schedule.end_instant()?;
    // Computed once in absolute time; occurrence ends preserve this duration
    // across DST transitions rather than the wall-clock end.
    let duration = template_end - template_start;

    let occurrences = match schedule.recurrence()? {
        None => {
            if template_start >= range_start && template_start <= range_end {
                vec![localtime::absolute_to_naive(template_start, tz)]
            } else {
                Vec::new()
            }
        }
        Some(rule) => recurrence::expand(
            &rule,
            localtime::absolute_to_naive(template_start, tz),
            localtime::absolute_to_naive(range_start, tz),
            localtime::absolute_to_naive(range_end, tz),
        ),
    };

    let mut sessions = Vec::with_capacity(occurrences.len());
    for occurrence in occurrences {
        let date = occurrence.date();
        let exception = exceptions.get(&date);

        if matches!(exception, Some(e) if e.exception_type == ExceptionType::Cancelled) {
            continue;
        }

        let start = match exception.and_then(|e| e.override_start.as_deref()) {
            Some(s) => localtime::parse_local(s, tz)?,
            None => localtime::naive_to_absolute(occurrence, tz)?,
        };
        let end = match exception.and_then(|e| e.override_end.as_deref()) {
            Some(s) => localtime::parse_local(s, tz)?,
            None => start + duration,
        };

        let hosts = exception
            .and_then(|e| e.override_hosts.clone())
            .unwrap_or_else(|| schedule.hosts.clone());
        let location_id = exception
            .and_then(|e| e.override_location_id.clone())
            .or_else(|| schedule.location_id.clone());
        let capacity = resolve_capacity(schedule, exception);

        let session_id = SessionId::new(schedule.schedule_id.clone(), date);
        let summary = summaries.get(&session_id);

        sessions.push(Session {
            session_id,
            tenant_id: schedule.tenant_id.clone(),
            schedule_id: schedule.schedule_id.clone(),
            date,
            start: Timestamp::from_datetime(start),
            end: Timestamp::from_datetime(end),
            timezone: schedule.timezone.clone(),
            schedule_type: schedule.schedule_type,
            program_id: schedule.program_id.clone(),
            hosts,
            location_id,
            tags: schedule.tags.clone(),
            capacity,
            booked_count: summary.map_or(0, |s| s.booked_count),
            waitlist_count: summary.map_or(0, |s| s.waitlist_count),
        });
    }

    sessions.sort_by_key(|s| s.start);
    Ok(sessions)
}
