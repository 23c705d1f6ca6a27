//! In-memory AttendanceRepository.

use async_trait::async_trait;

use crate::domain::attendance::AttendanceRecord;
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, SessionId, SubjectId, TenantId,
};
use crate::ports::AttendanceRepository;

use super::MemoryStore;

#[async_trait]
impl AttendanceRepository for MemoryStore {
    async fn create(&self, record: &AttendanceRecord) -> Result<(), DomainError> {
        let mut tables = self.lock();
        let key = (
            record.tenant_id.clone(),
            record.session_id.clone(),
            record.booking_id.clone(),
        );
        if tables.attendance.contains_key(&key) {
            return Err(DomainError::new(
                ErrorCode::AlreadyCheckedIn,
                format!("attendance already recorded for booking {}", record.booking_id),
            ));
        }
        tables.attendance.insert(key, record.clone());
        Ok(())
    }

    async fn upsert(&self, record: &AttendanceRecord) -> Result<(), DomainError> {
        self.lock().attendance.insert(
            (
                record.tenant_id.clone(),
                record.session_id.clone(),
                record.booking_id.clone(),
            ),
            record.clone(),
        );
        Ok(())
    }

    async fn get(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
        booking_id: &BookingId,
    ) -> Result<Option<AttendanceRecord>, DomainError> {
        Ok(self
            .lock()
            .attendance
            .get(&(tenant.clone(), session_id.clone(), booking_id.clone()))
            .cloned())
    }

    async fn list_by_session(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        Ok(self
            .lock()
            .attendance
            .iter()
            .filter(|((t, s, _), _)| t == tenant && s == session_id)
            .map(|(_, r)| r.clone())
            .collect())
    }

    async fn list_by_subject(
        &self,
        tenant: &TenantId,
        subject: &SubjectId,
    ) -> Result<Vec<AttendanceRecord>, DomainError> {
        Ok(self
            .lock()
            .attendance
            .iter()
            .filter(|((t, _, _), r)| t == tenant && &r.subject_id == subject)
            .map(|(_, r)| r.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::attendance::{AttendanceStatus, CheckInMethod};
    use crate::domain::foundation::Timestamp;

    fn record() -> AttendanceRecord {
        let now = Timestamp::now();
        AttendanceRecord {
            tenant_id: TenantId::new("t1").unwrap(),
            session_id: "sched_x#2025-01-06".parse().unwrap(),
            booking_id: BookingId::new("bk_1").unwrap(),
            subject_id: SubjectId::new("member_1").unwrap(),
            status: AttendanceStatus::Present,
            check_in_time: Some(now),
            check_in_method: CheckInMethod::Gps,
            check_in_lat: Some(30.2675),
            check_in_lng: Some(-97.7428),
            distance_meters: Some(42.0),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_key() {
        let store = MemoryStore::new();
        store.create(&record()).await.unwrap();

        let err = store.create(&record()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyCheckedIn);
    }

    #[tokio::test]
    async fn upsert_replaces() {
        let store = MemoryStore::new();
        store.create(&record()).await.unwrap();

        let mut updated = record();
        updated.status = AttendanceStatus::NoShow;
        store.upsert(&updated).await.unwrap();

        let tenant = TenantId::new("t1").unwrap();
        let session: SessionId = "sched_x#2025-01-06".parse().unwrap();
        let booking = BookingId::new("bk_1").unwrap();
        let found = AttendanceRepository::get(&store, &tenant, &session, &booking)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.status, AttendanceStatus::NoShow);
    }

    #[tokio::test]
    async fn lists_by_subject() {
        let store = MemoryStore::new();
        store.create(&record()).await.unwrap();

        let tenant = TenantId::new("t1").unwrap();
        let subject = SubjectId::new("member_1").unwrap();
        let found = store.list_by_subject(&tenant, &subject).await.unwrap();
        assert_eq!(found.len(), 1);

        let other = SubjectId::new("member_2").unwrap();
        assert!(store.list_by_subject(&tenant, &other).await.unwrap().is_empty());
    }
}
