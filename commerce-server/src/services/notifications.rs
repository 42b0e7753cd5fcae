//! Notification Dispatcher
//!
//! Stateless consumer of the event bus. Each subscribed topic maps to a
//! handler; a failing handler is logged and the loop continues - no
//! retry, no dead-letter, no crash.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;

use crate::events::EventBus;
use shared::DomainEvent;
use shared::events::{ClientCreated, topics};

/// Mail delivery failure
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct MailError(pub String);

/// Outbound email capability
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Mailer that only logs. Stands in for a real SMTP transport, which is
/// out of scope for this service.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, _body: &str) -> Result<(), MailError> {
        tracing::info!(to, subject, "email dispatched");
        Ok(())
    }
}

pub struct NotificationDispatcher {
    events: EventBus,
    mailer: Arc<dyn Mailer>,
}

impl NotificationDispatcher {
    pub fn new(events: EventBus, mailer: Arc<dyn Mailer>) -> Self {
        Self { events, mailer }
    }

    /// Run the dispatch loop on a background task until the token is
    /// cancelled or the bus closes
    pub fn spawn(self, shutdown: CancellationToken) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move { self.run(shutdown).await })
    }

    async fn run(self, shutdown: CancellationToken) {
        let mut rx = self.events.subscribe();
        tracing::info!("notification dispatcher started");
        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                received = rx.recv() => match received {
                    Ok(event) => {
                        if let Err(e) = self.handle(&event).await {
                            tracing::warn!(topic = %event.topic, error = %e, "notification handler failed");
                        }
                    }
                    Err(RecvError::Lagged(missed)) => {
                        tracing::warn!(missed, "notification dispatcher lagged, events dropped");
                    }
                    Err(RecvError::Closed) => break,
                },
            }
        }
        tracing::info!("notification dispatcher stopped");
    }

    pub(crate) async fn handle(&self, event: &DomainEvent) -> Result<(), MailError> {
        match event.topic.as_str() {
            topics::CLIENT_CREATED => {
                let payload: ClientCreated = event
                    .parse_payload()
                    .map_err(|e| MailError(format!("bad payload: {}", e)))?;
                self.mailer
                    .send(
                        &payload.email,
                        "Welcome",
                        &format!("Hello {}, welcome to the platform!", payload.first_name),
                    )
                    .await
            }
            // Confirmation mails for these are not wired up; receipt is
            // logged so the flow stays observable.
            topics::ORDER_CREATED | topics::PAYMENT_PROCESSED | topics::INVOICE_GENERATED => {
                tracing::info!(topic = %event.topic, "event received");
                Ok(())
            }
            _ => Ok(()),
        }
    }
}
