//! Schedule exception repository port.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ScheduleId, TenantId};
use crate::domain::scheduling::ScheduleException;

/// Persistence contract for per-date schedule exceptions, keyed by
/// `(tenant, schedule, occurrenceDate)`.
#[async_trait]
pub trait ExceptionRepository: Send + Sync {
    /// Insert or replace an exception.
    async fn put(&self, exception: &ScheduleException) -> Result<(), DomainError>;

    /// Fetch the exception for a specific date; `None` if absent.
    async fn get(
        &self,
        tenant: &TenantId,
        schedule: &ScheduleId,
        date: NaiveDate,
    ) -> Result<Option<ScheduleException>, DomainError>;

    /// Exceptions of a schedule whose date falls in `[start, end]`.
    async fn list_in_range(
        &self,
        tenant: &TenantId,
        schedule: &ScheduleId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleException>, DomainError>;

    /// Delete an exception.
    ///
    /// # Errors
    ///
    /// - `ExceptionNotFound` if it does not exist
    async fn delete(
        &self,
        tenant: &TenantId,
        schedule: &ScheduleId,
        date: NaiveDate,
    ) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ExceptionRepository) {}
    }
}
