//! In-memory ScheduleRepository.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, HostId, ProgramId, ScheduleId, TenantId};
use crate::domain::scheduling::Schedule;
use crate::ports::ScheduleRepository;

use super::MemoryStore;

#[async_trait]
impl ScheduleRepository for MemoryStore {
    async fn put(&self, schedule: &Schedule) -> Result<(), DomainError> {
        self.lock().schedules.insert(
            (schedule.tenant_id.clone(), schedule.schedule_id.clone()),
            schedule.clone(),
        );
        Ok(())
    }

    async fn get(
        &self,
        tenant: &TenantId,
        id: &ScheduleId,
    ) -> Result<Option<Schedule>, DomainError> {
        Ok(self.lock().schedules.get(&(tenant.clone(), id.clone())).cloned())
    }

    async fn list(&self, tenant: &TenantId) -> Result<Vec<Schedule>, DomainError> {
        Ok(self
            .lock()
            .schedules
            .iter()
            .filter(|((t, _), _)| t == tenant)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn list_by_programs(
        &self,
        tenant: &TenantId,
        programs: &[ProgramId],
    ) -> Result<Vec<Schedule>, DomainError> {
        Ok(self
            .lock()
            .schedules
            .iter()
            .filter(|((t, _), _)| t == tenant)
            .filter(|(_, s)| s.program_id.as_ref().is_some_and(|p| programs.contains(p)))
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn list_by_host(
        &self,
        tenant: &TenantId,
        host: &HostId,
    ) -> Result<Vec<Schedule>, DomainError> {
        Ok(self
            .lock()
            .schedules
            .iter()
            .filter(|((t, _), _)| t == tenant)
            .filter(|(_, s)| s.primary_host() == Some(host))
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn delete(&self, tenant: &TenantId, id: &ScheduleId) -> Result<(), DomainError> {
        match self.lock().schedules.remove(&(tenant.clone(), id.clone())) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(ErrorCode::ScheduleNotFound, "Schedule", id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::scheduling::{HostRef, ScheduleType};
    use serde_json::Map;

    fn schedule(id: &str, program: &str, host: &str) -> Schedule {
        let now = Timestamp::now();
        Schedule {
            tenant_id: TenantId::new("t1").unwrap(),
            schedule_id: ScheduleId::new(id).unwrap(),
            schedule_type: ScheduleType::Session,
            program_id: Some(ProgramId::new(program).unwrap()),
            start: "2025-01-06T07:00:00".to_string(),
            end: "2025-01-06T08:00:00".to_string(),
            timezone: "America/New_York".to_string(),
            is_recurring: false,
            rrule: None,
            base_capacity: None,
            hosts: vec![HostRef {
                id: HostId::new(host).unwrap(),
                kind: "STAFF".to_string(),
                role: None,
            }],
            location_id: None,
            tags: vec![],
            created_at: now,
            updated_at: now,
            extra: Map::new(),
        }
    }

    #[tokio::test]
    async fn filters_by_program_set() {
        let store = MemoryStore::new();
        store.put(&schedule("s1", "p1", "h1")).await.unwrap();
        store.put(&schedule("s2", "p2", "h1")).await.unwrap();
        store.put(&schedule("s3", "p3", "h2")).await.unwrap();

        let tenant = TenantId::new("t1").unwrap();
        let programs = vec![ProgramId::new("p1").unwrap(), ProgramId::new("p3").unwrap()];
        let found = store.list_by_programs(&tenant, &programs).await.unwrap();
        assert_eq!(found.len(), 2);
    }

    #[tokio::test]
    async fn filters_by_primary_host() {
        let store = MemoryStore::new();
        store.put(&schedule("s1", "p1", "h1")).await.unwrap();
        store.put(&schedule("s2", "p2", "h2")).await.unwrap();

        let tenant = TenantId::new("t1").unwrap();
        let found = store
            .list_by_host(&tenant, &HostId::new("h2").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].schedule_id.as_str(), "s2");
    }
}
