//! Repository Module
//!
//! One repository per service. Clients and products are CRUD-shaped and
//! implement [`crate::db::Repository`]; orders, payments and invoices
//! expose the bespoke operations their lifecycles need.

pub mod client;
pub mod invoice;
pub mod order;
pub mod payment;
pub mod product;

// Re-exports
pub use client::ClientRepository;
pub use invoice::InvoiceRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;
