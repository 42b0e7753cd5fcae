//! Server state
//!
//! [`ServerState`] bundles the long-lived collaborators every request
//! handler needs: the store handle, the event bus, the charge gateway and
//! the mailer. All of them are constructed once in [`ServerState::initialize`]
//! and injected through cheap `Arc` clones; there are no module-level
//! singletons.

use std::sync::Arc;

use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::core::Config;
use crate::db::{Database, Store};
use crate::events::EventBus;
use crate::services::{
    ChargeGateway, LogMailer, Mailer, NotificationDispatcher, SimulatedChargeGateway,
};

/// Shared server state, cloned into every handler
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Store handle
    pub db: Database,
    /// Event bus (long-lived publisher handle, safe for concurrent use)
    pub events: EventBus,
    /// Charging capability used by the payment processor
    pub charge_gateway: Arc<dyn ChargeGateway>,
    /// Outbound mail capability used by the notification dispatcher
    pub mailer: Arc<dyn Mailer>,
    /// Cancellation signal for background tasks
    pub shutdown: CancellationToken,
}

impl ServerState {
    /// Build state with default collaborators (in-process store, simulated
    /// charge gateway, logging mailer)
    pub fn initialize(config: &Config) -> Self {
        Self::with_collaborators(
            config.clone(),
            Store::shared(),
            EventBus::with_capacity(config.event_capacity),
            Arc::new(SimulatedChargeGateway),
            Arc::new(LogMailer),
        )
    }

    /// Build state from explicit collaborators (tests swap in mocks here)
    pub fn with_collaborators(
        config: Config,
        db: Database,
        events: EventBus,
        charge_gateway: Arc<dyn ChargeGateway>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        Self {
            config,
            db,
            events,
            charge_gateway,
            mailer,
            shutdown: CancellationToken::new(),
        }
    }

    /// Start background tasks. Must be called before `Server::run()`.
    ///
    /// Currently spawns the notification dispatcher.
    pub fn start_background_tasks(&self) {
        let dispatcher = NotificationDispatcher::new(self.events.clone(), self.mailer.clone());
        dispatcher.spawn(self.shutdown.clone());
    }

    /// Publish a domain event, logging and swallowing failures.
    ///
    /// Delivery is best-effort and advisory: a failed publish never rolls
    /// back or fails the state change that triggered it.
    pub fn publish_event(&self, topic: &str, payload: impl Serialize) {
        if let Err(e) = self.events.publish(topic, payload) {
            tracing::warn!(topic, error = %e, "event publish failed");
        }
    }
}
