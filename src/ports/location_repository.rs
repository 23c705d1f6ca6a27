//! Location repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, LocationId, TenantId};
use crate::domain::scheduling::Location;

/// Persistence contract for locations.
#[async_trait]
pub trait LocationRepository: Send + Sync {
    /// Insert or replace a location.
    async fn put(&self, location: &Location) -> Result<(), DomainError>;

    /// Fetch one location; `None` if absent.
    async fn get(
        &self,
        tenant: &TenantId,
        id: &LocationId,
    ) -> Result<Option<Location>, DomainError>;

    /// All locations of a tenant.
    async fn list(&self, tenant: &TenantId) -> Result<Vec<Location>, DomainError>;

    /// Delete a location.
    ///
    /// # Errors
    ///
    /// - `LocationNotFound` if it does not exist
    async fn delete(&self, tenant: &TenantId, id: &LocationId) -> Result<(), DomainError>;
}
