//! Event envelope for the bus-facing surfaces.
//!
//! Inbound booking requests and outbound result events travel in the same
//! shape: a `source`, a `detail_type` used for routing, and a JSON `detail`
//! payload. `event_id` exists for deduplication under at-least-once
//! delivery.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Unique identifier for events (used for deduplication).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new random EventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an EventId from an existing string.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transport envelope for bus events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique ID for this event instance.
    pub event_id: EventId,

    /// Emitting system (e.g. "bookwell.scheduling" for outbound events).
    pub source: String,

    /// Event kind used for routing (e.g. "scheduling.booking_requested").
    #[serde(rename = "detail-type")]
    pub detail_type: String,

    /// Event-specific payload as JSON.
    pub detail: JsonValue,

    /// When the event was emitted.
    pub emitted_at: Timestamp,
}

impl EventEnvelope {
    /// Creates an envelope with a fresh event id, stamped now.
    pub fn new(source: impl Into<String>, detail_type: impl Into<String>, detail: JsonValue) -> Self {
        Self {
            event_id: EventId::new(),
            source: source.into(),
            detail_type: detail_type.into(),
            detail,
            emitted_at: Timestamp::now(),
        }
    }
}
