//! Read side of the session counters.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, SessionId, TenantId};
use crate::domain::scheduling::SessionSummary;

/// Batch read contract for session summaries.
///
/// Summaries exist only for sessions that have seen bookings; absent ids are
/// simply missing from the result map. Callers chunk large batches at 100.
#[async_trait]
pub trait SummaryReader: Send + Sync {
    /// Fetch one summary; `None` if the session has never been booked.
    async fn get(
        &self,
        tenant: &TenantId,
        session_id: &SessionId,
    ) -> Result<Option<SessionSummary>, DomainError>;

    /// Fetch many summaries keyed by session id.
    async fn get_many(
        &self,
        tenant: &TenantId,
        session_ids: &[SessionId],
    ) -> Result<HashMap<SessionId, SessionSummary>, DomainError>;
}
