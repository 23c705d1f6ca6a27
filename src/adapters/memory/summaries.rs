//! In-memory SummaryReader.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, TenantId};
use crate::domain::scheduling::SessionSummary;
use crate::ports::SummaryReader;

use super::MemoryStore;

#[async_trait]
impl SummaryReader for MemoryStore {
    async fn get(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError> {
        Ok(self
            .lock()
            .summaries
            .get(&(tenant.clone(), session_id.clone()))
            .cloned())
    }

    async fn get_many(
        &self,
        tenant: &TenantId,
        session_ids: &[SessionId],
    ) -> Result<HashMap<SessionId, SessionSummary>, DomainError> {
        let tables = self.lock();
        let mut result = HashMap::new();
        for id in session_ids {
            if let Some(summary) = tables.summaries.get(&(tenant.clone(), id.clone())) {
                result.insert(id.clone(), summary.clone());
            }
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::booking::Booking;
    use crate::domain::foundation::SubjectId;
    use crate::ports::BookingRepository;

    #[tokio::test]
    async fn get_many_returns_only_existing_rows() {
        let store = MemoryStore::new();
        let tenant = TenantId::new("t1").unwrap();
        let booked: SessionId = "sched_x#2025-01-06".parse().unwrap();
        let untouched: SessionId = "sched_x#2025-01-08".parse().unwrap();

        let booking = Booking::confirmed(
            tenant.clone(),
            booked.clone(),
            SubjectId::new("member_1").unwrap(),
            "MEMBER",
        );
        store.create_confirmed(&booking, Some(5)).await.unwrap();

        let result = store
            .get_many(&tenant, &[booked.clone(), untouched.clone()])
            .await
            .unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result.get(&booked).unwrap().booked_count, 1);
        assert!(!result.contains_key(&untouched));

        assert!(SummaryReader::get(&store, &tenant, &untouched).await.unwrap().is_none());
    }
}
