//! Commerce Server - service host for the e-commerce platform
//!
//! Hosts the five resource services (clients, products, orders, payments,
//! invoices) plus the notification dispatcher. Each service is a module
//! pair under `api/` and `db/repository/`; cross-service reads go through
//! the component seams in `services/`, never through another service's
//! tables.
//!
//! # Module structure
//!
//! ```text
//! commerce-server/src/
//! ├── core/          # Configuration, state, HTTP server lifecycle
//! ├── api/           # HTTP routes and handlers, one module per service
//! ├── db/            # Store handle and repositories
//! ├── events/        # In-process event bus
//! ├── services/      # Order ledger, payment processor, invoice
//! │                  # generator, notification dispatcher
//! └── utils/         # Logging, payload validation
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod events;
pub mod services;
pub mod utils;

// Re-export common types
pub use crate::core::{Config, Server, ServerState};
pub use crate::events::EventBus;
pub use shared::{ApiError, ApiResult};
