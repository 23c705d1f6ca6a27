//! Auth adapters.
//!
//! The real identity provider is an external collaborator; this module
//! supplies a static verifier for tests and local development.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{Claims, TokenVerifier};

/// Token verifier backed by a fixed token -> claims table.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: RwLock<HashMap<String, Claims>>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token with its claims.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn register(&self, token: impl Into<String>, claims: Claims) {
        self.tokens
            .write()
            .expect("StaticTokenVerifier: lock poisoned")
            .insert(token.into(), claims);
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Claims, DomainError> {
        self.tokens
            .read()
            .expect("StaticTokenVerifier: lock poisoned")
            .get(token)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::Forbidden, "token verification failed"))
    }
}
