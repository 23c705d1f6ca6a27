//! Tenant and subject resolution.
//!
//! Resolution order, outermost first:
//! - tenant: verified claim (`custom:tenantId` / `custom:tenant_id`), then
//!   the `X-Tenant-Id` header, then the `tenantId` query parameter;
//! - subject: verified claim (`sub`), then the `X-Subject-Id` header, then
//!   a request-body field handled by the individual endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{FromRequestParts, Query, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::domain::foundation::{SubjectId, TenantId};
use crate::ports::{Claims, TokenVerifier};

use super::error::ErrorResponse;

/// Middleware that validates a bearer token when present and stashes its
/// claims in the request extensions. Requests without a token pass through;
/// an invalid token is rejected.
pub async fn identity_middleware(
    State(verifier): State<Arc<dyn TokenVerifier>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match verifier.verify(token).await {
            Ok(claims) => {
                request.extensions_mut().insert(claims);
                next.run(request).await
            }
            Err(e) => (
                StatusCode::FORBIDDEN,
                Json(ErrorResponse::new(e.message)),
            )
                .into_response(),
        },
        None => next.run(request).await,
    }
}

fn query_params(parts: &Parts) -> HashMap<String, String> {
    Query::<HashMap<String, String>>::try_from_uri(&parts.uri)
        .map(|Query(params)| params)
        .unwrap_or_default()
}

/// Extractor for the resolved tenant. Rejects with 400 when no source
/// provides one.
#[derive(Debug, Clone)]
pub struct Tenant(pub TenantId);

#[async_trait]
impl<S> FromRequestParts<S> for Tenant
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_claims = parts
            .extensions
            .get::<Claims>()
            .and_then(|c| c.tenant_id.clone());

        let from_header = parts
            .headers
            .get("X-Tenant-Id")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| TenantId::new(s).ok());

        let from_query = query_params(parts)
            .get("tenantId")
            .and_then(|s| TenantId::new(s.as_str()).ok());

        from_claims
            .or(from_header)
            .or(from_query)
            .map(Tenant)
            .ok_or_else(|| {
                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorResponse::new("tenantId is required")),
                )
                    .into_response()
            })
    }
}

/// Extractor for the caller's subject, when any source provides one.
/// Endpoints accepting a body-level `subjectId` apply it as the last
/// fallback themselves.
#[derive(Debug, Clone)]
pub struct Subject(pub Option<SubjectId>);

#[async_trait]
impl<S> FromRequestParts<S> for Subject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let from_claims = parts
            .extensions
            .get::<Claims>()
            .and_then(|c| c.subject_id.clone());

        let from_header = parts
            .headers
            .get("X-Subject-Id")
            .and_then(|h| h.to_str().ok())
            .and_then(|s| SubjectId::new(s).ok());

        Ok(Subject(from_claims.or(from_header)))
    }
}
