use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use anyhow::Result;

// ============================================================================
// Event Envelope - Event Metadata
// ============================================================================
//
// Wraps a domain event payload with identity, name and timing.
// Generic over the payload type.
//
// ============================================================================

/// Generic Event Envelope - wraps any domain event with metadata
///
/// Type Parameter:
/// - `E`: The domain event payload
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EventEnvelope<E> {
    pub event_id: Uuid,

    /// Name handlers are registered under, e.g. "OrderCreated"
    pub event_type: String,
    pub event_version: i32,

    pub payload: E,

    pub timestamp: DateTime<Utc>,

    pub metadata: HashMap<String, String>,
}

impl<E: DomainEvent> EventEnvelope<E> {
    /// Wrap a payload under its own event type name
    pub fn new(payload: E) -> Self {
        Self::named(E::event_type(), payload).with_version(E::event_version())
    }
}

impl<E> EventEnvelope<E> {
    pub fn named(event_type: impl Into<String>, payload: E) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            event_type: event_type.into(),
            event_version: 1,
            payload,
            timestamp: Utc::now(),
            metadata: HashMap::new(),
        }
    }

    pub fn with_version(mut self, version: i32) -> Self {
        self.event_version = version;
        self
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// Domain Event Trait
// ============================================================================

/// Payloads carried through the dispatcher implement this trait
pub trait DomainEvent: Serialize + for<'de> Deserialize<'de> + Clone + Send + Sync {
    fn event_type() -> &'static str where Self: Sized;
    fn event_version() -> i32 where Self: Sized { 1 }
}

pub fn serialize_event<E: Serialize>(event: &E) -> Result<String> {
    Ok(serde_json::to_string(event)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize, Deserialize, Clone, Debug)]
    struct TestEvent {
        data: String,
    }

    impl DomainEvent for TestEvent {
        fn event_type() -> &'static str { "TestEvent" }
        fn event_version() -> i32 { 2 }
    }

    #[test]
    fn test_event_envelope_creation() {
        let envelope = EventEnvelope::new(TestEvent {
            data: "test".to_string(),
        });

        assert_eq!(envelope.event_type, "TestEvent");
        assert_eq!(envelope.event_version, 2);
        assert_eq!(envelope.payload.data, "test");
        assert!(envelope.metadata.is_empty());
    }

    #[test]
    fn test_named_envelope_with_metadata() {
        let envelope = EventEnvelope::named("Custom", 42u32)
            .with_metadata("source", "http");

        assert_eq!(envelope.event_type, "Custom");
        assert_eq!(envelope.event_version, 1);
        assert_eq!(envelope.metadata.get("source").map(String::as_str), Some("http"));
    }

    #[test]
    fn test_envelope_serialization() {
        let envelope = EventEnvelope::new(TestEvent {
            data: "test data".to_string(),
        });

        let json = serialize_event(&envelope).unwrap();
        let deserialized: EventEnvelope<TestEvent> = serde_json::from_str(&json).unwrap();

        assert_eq!(deserialized.event_id, envelope.event_id);
        assert_eq!(deserialized.payload.data, "test data");
    }
}
