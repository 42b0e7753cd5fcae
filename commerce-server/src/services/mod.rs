//! Domain services
//!
//! The components behind the HTTP handlers:
//!
//! - [`OrderLedger`] - order aggregate lifecycle (pricing, status,
//!   cancellation)
//! - [`PaymentProcessor`] - payment attempts and refunds behind the
//!   [`ChargeGateway`] capability
//! - [`InvoiceGenerator`] - invoices derived from order snapshots
//! - [`NotificationDispatcher`] - event consumer driving the [`Mailer`]
//! - [`Catalog`] - the price-lookup seam the ledger depends on

pub mod catalog;
pub mod invoicing;
pub mod ledger;
pub mod notifications;
pub mod payments;

pub use catalog::{Catalog, CatalogError, StoreCatalog};
pub use invoicing::InvoiceGenerator;
pub use ledger::OrderLedger;
pub use notifications::{LogMailer, MailError, Mailer, NotificationDispatcher};
pub use payments::{ChargeError, ChargeGateway, PaymentProcessor, SimulatedChargeGateway};
