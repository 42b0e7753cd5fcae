//! In-memory store
//!
//! One concurrent table per entity, keyed by id. Orders embed their line
//! items, so the aggregate root lives in a single slot and inserts and
//! updates of an order are atomic with respect to its items.

use std::sync::Arc;

use dashmap::DashMap;
use shared::models::{Client, Invoice, Order, Payment, Product};

/// Entity tables. Reached only through the repositories in
/// [`crate::db::repository`].
#[derive(Debug, Default)]
pub struct Store {
    pub(crate) clients: DashMap<String, Client>,
    pub(crate) products: DashMap<String, Product>,
    pub(crate) orders: DashMap<String, Order>,
    pub(crate) payments: DashMap<String, Payment>,
    pub(crate) invoices: DashMap<String, Invoice>,
}

/// Process-wide store handle
pub type Database = Arc<Store>;

impl Store {
    /// Create an empty store behind a shared handle
    pub fn shared() -> Database {
        Arc::new(Self::default())
    }
}
