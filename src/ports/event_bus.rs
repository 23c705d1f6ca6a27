//! Event bus ports: publishing and inbound delivery.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EventEnvelope};

/// Port for emitting envelopes to the bus.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError>;
}

/// Handler invoked for inbound envelopes.
///
/// The transport provides at-least-once delivery; handlers must tolerate
/// duplicates and must not propagate failures back to the transport (a
/// thrown error causes redelivery).
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, envelope: EventEnvelope) -> Result<(), DomainError>;

    /// Stable handler name, used for logging and idempotency keys.
    fn name(&self) -> &'static str;
}

/// Registration of handlers by detail type.
pub trait EventSubscriber: Send + Sync {
    fn subscribe(&self, detail_type: &str, handler: Arc<dyn EventHandler>);

    fn subscribe_all(&self, detail_types: &[&str], handler: Arc<dyn EventHandler>);
}
