//! Program repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ProgramId, TenantId};
use crate::domain::scheduling::Program;

/// Persistence contract for programs.
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Insert or replace a program.
    async fn put(&self, program: &Program) -> Result<(), DomainError>;

    /// Fetch one program; `None` if absent.
    async fn get(&self, tenant: &TenantId, id: &ProgramId) -> Result<Option<Program>, DomainError>;

    /// All programs of a tenant.
    async fn list(&self, tenant: &TenantId) -> Result<Vec<Program>, DomainError>;

    /// Delete a program.
    ///
    /// # Errors
    ///
    /// - `ProgramNotFound` if it does not exist
    async fn delete(&self, tenant: &TenantId, id: &ProgramId) -> Result<(), DomainError>;
}
