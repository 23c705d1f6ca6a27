//! In-memory event bus.
//!
//! Synchronous, deterministic delivery by detail type, with capture helpers
//! for assertions.
//!
//! # Panics
//!
//! Methods panic if internal locks are poisoned. This adapter is for tests
//! and local development; the production transport sits behind the same
//! ports.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, EventEnvelope};
use crate::ports::{EventHandler, EventPublisher, EventSubscriber};

/// In-memory event bus.
///
/// # Example
///
/// ```ignore
/// let bus = Arc::new(InMemoryEventBus::new());
/// bus.subscribe("scheduling.booking_requested", worker);
///
/// bus.publish(envelope).await?;
/// assert!(bus.has_event("scheduling.booking_confirmed"));
/// ```
pub struct InMemoryEventBus {
    handlers: RwLock<HashMap<String, Vec<Arc<dyn EventHandler>>>>,
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventBus {
    /// Creates a new empty event bus.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
            published: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all published events.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific detail type.
    pub fn events_of_type(&self, detail_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.detail_type == detail_type)
            .collect()
    }

    /// Clears all published events (for test isolation).
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .clear();
    }

    /// Returns count of published events.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .len()
    }

    /// Checks if an event of the given detail type was published.
    pub fn has_event(&self, detail_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryEventBus: published lock poisoned")
            .iter()
            .any(|e| e.detail_type == detail_type)
    }
}

impl Default for InMemoryEventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, event: EventEnvelope) -> Result<(), DomainError> {
        // Store for test assertions
        self.published
            .write()
            .expect("InMemoryEventBus: published write lock poisoned")
            .push(event.clone());

        // Clone handlers to release the lock before await points
        let type_handlers: Vec<Arc<dyn EventHandler>> = {
            let handlers = self
                .handlers
                .read()
                .expect("InMemoryEventBus: handlers lock poisoned");
            handlers.get(&event.detail_type).cloned().unwrap_or_default()
        };

        let mut errors = Vec::new();
        for handler in type_handlers {
            if let Err(e) = handler.handle(event.clone()).await {
                errors.push(format!("{}: {}", handler.name(), e));
            }
        }

        if !errors.is_empty() {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                format!("Handler errors: {}", errors.join(", ")),
            ));
        }

        Ok(())
    }
}

impl EventSubscriber for InMemoryEventBus {
    fn subscribe(&self, detail_type: &str, handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers write lock poisoned");
        handlers
            .entry(detail_type.to_string())
            .or_default()
            .push(handler);
    }

    fn subscribe_all(&self, detail_types: &[&str], handler: Arc<dyn EventHandler>) {
        let mut handlers = self
            .handlers
            .write()
            .expect("InMemoryEventBus: handlers write lock poisoned");
        for detail_type in detail_types {
            handlers
                .entry(detail_type.to_string())
                .or_default()
                .push(Arc::clone(&handler));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_envelope(detail_type: &str) -> EventEnvelope {
        EventEnvelope::new("test", detail_type, json!({}))
    }

    struct CountingHandler(Arc<AtomicUsize>);

    #[async_trait]
    impl EventHandler for CountingHandler {
        async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
        fn name(&self) -> &'static str {
            "CountingHandler"
        }
    }

    #[tokio::test]
    async fn publish_stores_event() {
        let bus = InMemoryEventBus::new();
        bus.publish(test_envelope("test.event")).await.unwrap();

        assert_eq!(bus.event_count(), 1);
        assert!(bus.has_event("test.event"));
    }

    #[tokio::test]
    async fn events_of_type_filters_correctly() {
        let bus = InMemoryEventBus::new();
        bus.publish(test_envelope("type.a")).await.unwrap();
        bus.publish(test_envelope("type.b")).await.unwrap();
        bus.publish(test_envelope("type.a")).await.unwrap();

        assert_eq!(bus.events_of_type("type.a").len(), 2);
    }

    #[tokio::test]
    async fn handler_receives_matching_events_only() {
        let bus = Arc::new(InMemoryEventBus::new());
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe("type.a", Arc::new(CountingHandler(counter.clone())));

        bus.publish(test_envelope("type.a")).await.unwrap();
        bus.publish(test_envelope("type.b")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn subscribe_all_registers_for_multiple_types() {
        let bus = Arc::new(InMemoryEventBus::new());
        let counter = Arc::new(AtomicUsize::new(0));
        bus.subscribe_all(&["type.a", "type.b"], Arc::new(CountingHandler(counter.clone())));

        bus.publish(test_envelope("type.a")).await.unwrap();
        bus.publish(test_envelope("type.b")).await.unwrap();
        bus.publish(test_envelope("type.c")).await.unwrap();

        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn clear_removes_all_events() {
        let bus = InMemoryEventBus::new();
        bus.publish(test_envelope("test.event")).await.unwrap();
        bus.publish(test_envelope("test.event")).await.unwrap();
        assert_eq!(bus.event_count(), 2);

        bus.clear();
        assert_eq!(bus.event_count(), 0);
    }

    #[tokio::test]
    async fn handler_error_is_propagated() {
        struct FailingHandler;

        #[async_trait]
        impl EventHandler for FailingHandler {
            async fn handle(&self, _: EventEnvelope) -> Result<(), DomainError> {
                Err(DomainError::new(ErrorCode::InternalError, "Handler failed"))
            }
            fn name(&self) -> &'static str {
                "FailingHandler"
            }
        }

        let bus = Arc::new(InMemoryEventBus::new());
        bus.subscribe("test.event", Arc::new(FailingHandler));

        let result = bus.publish(test_envelope("test.event")).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().message.contains("FailingHandler"));
    }
}
