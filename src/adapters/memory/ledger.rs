//! Capacity ledger conditions on the summaries table.
//!
//! Both operations run inside the booking transaction's critical section;
//! callers hold the table lock.

use crate::domain::foundation::{DomainError, ErrorCode, SessionId, TenantId, Timestamp};
use crate::domain::scheduling::SessionSummary;

use super::Tables;

/// Conditional seat reservation.
///
/// Condition: `bookedCount < resolvedCapacity` when a capacity is present
/// (an absent summary counts as zero). On success the counter increments
/// and the stored capacity is refreshed to the resolved value so it tracks
/// schedule and override changes.
pub(super) fn reserve(
    tables: &mut Tables,
    tenant: &TenantId,
    session_id: &SessionId,
    resolved_capacity: Option<u32>,
) -> Result<(), DomainError> {
    let key = (tenant.clone(), session_id.clone());
    let booked = tables.summaries.get(&key).map_or(0, |s| s.booked_count);

    if let Some(capacity) = resolved_capacity {
        if booked >= capacity {
            return Err(DomainError::new(
                ErrorCode::AtCapacity,
                format!("session {} is at capacity ({})", session_id, capacity),
            ));
        }
    }

    let entry = tables.summaries.entry(key).or_insert_with(|| SessionSummary {
        tenant_id: tenant.clone(),
        session_id: session_id.clone(),
        date: session_id.date(),
        capacity: resolved_capacity,
        booked_count: 0,
        waitlist_count: 0,
        updated_at: Timestamp::now(),
    });
    entry.booked_count = booked + 1;
    entry.capacity = resolved_capacity;
    entry.updated_at = Timestamp::now();
    Ok(())
}

/// Conditional seat release.
///
/// Condition: `bookedCount > 0`. Failure is a logic error - booking
/// invariants guarantee a confirmed booking incremented the counter.
pub(super) fn release(
    tables: &mut Tables,
    tenant: &TenantId,
    session_id: &SessionId,
) -> Result<(), DomainError> {
    let key = (tenant.clone(), session_id.clone());
    match tables.summaries.get_mut(&key) {
        Some(summary) if summary.booked_count > 0 => {
            summary.booked_count -= 1;
            summary.updated_at = Timestamp::now();
            Ok(())
        }
        _ => Err(DomainError::new(
            ErrorCode::CounterUnderflow,
            format!("release on session {} with no reserved seats", session_id),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tenant() -> TenantId {
        TenantId::new("t1").unwrap()
    }

    fn session() -> SessionId {
        "sched_x#2025-01-06".parse().unwrap()
    }

    #[test]
    fn reserve_creates_summary_with_date() {
        let mut tables = Tables::default();
        reserve(&mut tables, &tenant(), &session(), Some(5)).unwrap();

        let summary = tables.summaries.get(&(tenant(), session())).unwrap();
        assert_eq!(summary.booked_count, 1);
        assert_eq!(summary.capacity, Some(5));
        assert_eq!(summary.date, session().date());
    }

    #[test]
    fn reserve_fails_at_capacity() {
        let mut tables = Tables::default();
        reserve(&mut tables, &tenant(), &session(), Some(1)).unwrap();

        let err = reserve(&mut tables, &tenant(), &session(), Some(1)).unwrap_err();
        assert_eq!(err.code, ErrorCode::AtCapacity);
        assert_eq!(
            tables.summaries.get(&(tenant(), session())).unwrap().booked_count,
            1
        );
    }

    #[test]
    fn reserve_without_capacity_is_unbounded() {
        let mut tables = Tables::default();
        for _ in 0..50 {
            reserve(&mut tables, &tenant(), &session(), None).unwrap();
        }
        assert_eq!(
            tables.summaries.get(&(tenant(), session())).unwrap().booked_count,
            50
        );
    }

    #[test]
    fn reserve_refreshes_stored_capacity() {
        let mut tables = Tables::default();
        reserve(&mut tables, &tenant(), &session(), Some(5)).unwrap();
        reserve(&mut tables, &tenant(), &session(), Some(8)).unwrap();

        assert_eq!(tables.summaries.get(&(tenant(), session())).unwrap().capacity, Some(8));
    }

    #[test]
    fn zero_capacity_admits_nobody() {
        let mut tables = Tables::default();
        let err = reserve(&mut tables, &tenant(), &session(), Some(0)).unwrap_err();
        assert_eq!(err.code, ErrorCode::AtCapacity);
        assert!(tables.summaries.is_empty());
    }

    #[test]
    fn release_decrements() {
        let mut tables = Tables::default();
        reserve(&mut tables, &tenant(), &session(), Some(5)).unwrap();
        reserve(&mut tables, &tenant(), &session(), Some(5)).unwrap();

        release(&mut tables, &tenant(), &session()).unwrap();
        assert_eq!(
            tables.summaries.get(&(tenant(), session())).unwrap().booked_count,
            1
        );
    }

    #[test]
    fn release_below_zero_underflows() {
        let mut tables = Tables::default();
        reserve(&mut tables, &tenant(), &session(), Some(5)).unwrap();
        release(&mut tables, &tenant(), &session()).unwrap();

        let err = release(&mut tables, &tenant(), &session()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CounterUnderflow);
    }

    #[test]
    fn release_on_missing_summary_underflows() {
        let mut tables = Tables::default();
        let err = release(&mut tables, &tenant(), &session()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CounterUnderflow);
    }
}
