//! Schedule repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, HostId, ProgramId, ScheduleId, TenantId};
use crate::domain::scheduling::Schedule;

/// Persistence contract for schedules.
///
/// Implementations index schedules by primary host so host-scoped lookups
/// do not scan the tenant.
#[async_trait]
pub trait ScheduleRepository: Send + Sync {
    /// Insert or replace a schedule.
    async fn put(&self, schedule: &Schedule) -> Result<(), DomainError>;

    /// Fetch one schedule; `None` if absent.
    async fn get(
        &self,
        tenant: &TenantId,
        id: &ScheduleId,
    ) -> Result<Option<Schedule>, DomainError>;

    /// All schedules of a tenant.
    async fn list(&self, tenant: &TenantId) -> Result<Vec<Schedule>, DomainError>;

    /// Schedules referencing one of the given programs.
    async fn list_by_programs(
        &self,
        tenant: &TenantId,
        programs: &[ProgramId],
    ) -> Result<Vec<Schedule>, DomainError>;

    /// Schedules whose primary host matches.
    async fn list_by_host(
        &self,
        tenant: &TenantId,
        host: &HostId,
    ) -> Result<Vec<Schedule>, DomainError>;

    /// Delete a schedule.
    ///
    /// # Errors
    ///
    /// - `ScheduleNotFound` if it does not exist
    async fn delete(&self, tenant: &TenantId, id: &ScheduleId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn ScheduleRepository) {}
    }
}
