//! In-memory ProgramRepository.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode, ProgramId, TenantId};
use crate::domain::scheduling::Program;
use crate::ports::ProgramRepository;

use super::MemoryStore;

#[async_trait]
impl ProgramRepository for MemoryStore {
    async fn put(&self, program: &Program) -> Result<(), DomainError> {
        self.lock().programs.insert(
            (program.tenant_id.clone(), program.program_id.clone()),
            program.clone(),
        );
        Ok(())
    }

    async fn get(&self, tenant: &TenantId, id: &ProgramId) -> Result<Option<Program>, DomainError> {
        Ok(self.lock().programs.get(&(tenant.clone(), id.clone())).cloned())
    }

    async fn list(&self, tenant: &TenantId) -> Result<Vec<Program>, DomainError> {
        Ok(self
            .lock()
            .programs
            .iter()
            .filter(|((t, _), _)| t == tenant)
            .map(|(_, p)| p.clone())
            .collect())
    }

    async fn delete(&self, tenant: &TenantId, id: &ProgramId) -> Result<(), DomainError> {
        match self.lock().programs.remove(&(tenant.clone(), id.clone())) {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(ErrorCode::ProgramNotFound, "Program", id)),
        }
    }
}
