//! In-memory LocationRepository.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, LocationId, TenantId};
use crate::domain::scheduling::Location;
use crate::ports::LocationRepository;

use super::MemoryStore;

#[async_trait]
impl LocationRepository for MemoryStore {
    async fn put(&self, location: &Location) -> Result<(), DomainError> {
        self.lock().locations.insert(
            (location.tenant_id.clone(), location.location_id.clone()),
            location.clone(),
        );
        Ok(())
    }

    async fn get(
        &self,
        tenant: &TenantId,
        id: &LocationId,
    ) -> Result<Option<Location>, DomainError> {
        Ok(self.lock().locations.get(&(tenant.clone(), id.clone())).cloned())
    }

    async fn list(&self, tenant: &TenantId) -> Result<Vec<Location>, DomainError> {
        Ok(self
            .lock()
            .locations
            .iter()
            .filter(|((t, _), _)| t == tenant)
            .map(|(_, l)| l.clone())
            .collect())
    }

    async fn delete(&self, tenant: &TenantId, id: &LocationId) -> Result<(), DomainError> {
        match self.lock().locations.remove(&(tenant.clone(), id.clone())) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(ErrorCode::LocationNotFound, "Location", id)),
        }
    }
}
