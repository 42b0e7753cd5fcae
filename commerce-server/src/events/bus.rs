//! Event bus core
//!
//! Publish/subscribe over a broadcast channel. Publication is
//! at-most-one-attempt: there is no acknowledgment, ordering guarantee,
//! retry or replay. Callers treat a failed publish as advisory and log
//! it; the state change that triggered the event stands either way.

use serde::Serialize;
use shared::DomainEvent;
use thiserror::Error;
use tokio::sync::broadcast;

/// Default broadcast channel capacity
pub const DEFAULT_CAPACITY: usize = 1024;

/// Event publication failure
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("event serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("no subscriber to deliver to")]
    NoSubscribers,
}

/// Long-lived publisher/subscriber handle. Cloning is cheap and every
/// clone publishes into the same channel; safe for concurrent use.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<DomainEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Publish an event to a topic
    pub fn publish(&self, topic: &str, payload: impl Serialize) -> Result<(), PublishError> {
        let event = DomainEvent::new(topic, payload)?;
        self.tx
            .send(event)
            .map_err(|_| PublishError::NoSubscribers)?;
        Ok(())
    }

    /// Subscribe to all events; filter by topic on the receiving side
    pub fn subscribe(&self) -> broadcast::Receiver<DomainEvent> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = EventBus::new();
        let mut rx = bus.subscribe();

        bus.publish("order.created", serde_json::json!({"id": "o1"}))
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.topic, "order.created");
        assert_eq!(event.payload["id"], "o1");
    }

    #[tokio::test]
    async fn publish_without_subscriber_is_an_error_not_a_panic() {
        let bus = EventBus::new();
        let err = bus
            .publish("order.created", serde_json::json!({}))
            .unwrap_err();
        assert!(matches!(err, PublishError::NoSubscribers));
    }
}
