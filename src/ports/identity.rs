//! Identity port: bearer token to tenant/subject claims.
//!
//! Authentication itself is an external collaborator; this seam only models
//! the claims the scheduling surface consumes.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SubjectId, TenantId};

/// Claims extracted from a verified token.
///
/// `tenant_id` comes from the `custom:tenantId` / `custom:tenant_id` claim,
/// `subject_id` from `sub`. Either may be absent; the HTTP layer falls back
/// to headers and query parameters.
#[derive(Debug, Clone, Default)]
pub struct Claims {
    pub tenant_id: Option<TenantId>,
    pub subject_id: Option<SubjectId>,
}

/// Port for validating bearer tokens.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verifies a token and returns its claims.
    ///
    /// # Errors
    ///
    /// - `Forbidden` for tokens that fail verification
    async fn verify(&self, token: &str) -> Result<Claims, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_verifier_is_object_safe() {
        fn _accepts_dyn(_v: &dyn TokenVerifier) {}
    }
}
