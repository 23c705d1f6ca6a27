//! In-memory ExceptionRepository.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::foundation::{DomainError, ErrorCode, ScheduleId, TenantId};
use crate::domain::scheduling::ScheduleException;
use crate::ports::ExceptionRepository;

use super::MemoryStore;

#[async_trait]
impl ExceptionRepository for MemoryStore {
    async fn put(&self, exception: &ScheduleException) -> Result<(), DomainError> {
        self.lock().exceptions.insert(
            (
                exception.tenant_id.clone(),
                exception.schedule_id.clone(),
                exception.occurrence_date,
            ),
            exception.clone(),
        );
        Ok(())
    }

    async fn get(
        &self,
        tenant: &TenantId,
        schedule: &ScheduleId,
        date: NaiveDate,
    ) -> Result<Option<ScheduleException>, DomainError> {
        Ok(self
            .lock()
            .exceptions
            .get(&(tenant.clone(), schedule.clone(), date))
            .cloned())
    }

    async fn list_in_range(
        &self,
        tenant: &TenantId,
        schedule: &ScheduleId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<ScheduleException>, DomainError> {
        Ok(self
            .lock()
            .exceptions
            .iter()
            .filter(|((t, s, d), _)| t == tenant && s == schedule && *d >= start && *d <= end)
            .map(|(_, e)| e.clone())
            .collect())
    }

    async fn delete(
        &self,
        tenant: &TenantId,
        schedule: &ScheduleId,
        date: NaiveDate,
    ) -> Result<(), DomainError> {
        match self
            .lock()
            .exceptions
            .remove(&(tenant.clone(), schedule.clone(), date))
        {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(
                ErrorCode::ExceptionNotFound,
                "Exception",
                format!("{}#{}", schedule, date),
            )),
        }
    }
}
