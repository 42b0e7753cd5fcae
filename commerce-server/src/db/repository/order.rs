//! Order Repository
//!
//! The order aggregate (order + owned line items) occupies one store
//! slot: creating an order persists the whole aggregate in a single
//! insert, so a partially-written order cannot be observed.

use chrono::Utc;

use crate::db::{Database, RepoError, RepoResult};
use shared::models::{Order, OrderStatus};

#[derive(Clone)]
pub struct OrderRepository {
    db: Database,
}

impl OrderRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Persist a fully-built aggregate
    pub async fn create(&self, order: Order) -> RepoResult<Order> {
        self.db.orders.insert(order.id.clone(), order.clone());
        Ok(order)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        Ok(self.db.orders.get(id).map(|e| e.value().clone()))
    }

    /// List orders matching every given predicate (conjunctive filters;
    /// an absent filter is unconstrained), ordered by creation time
    pub async fn find_filtered(
        &self,
        client_id: Option<&str>,
        status: Option<OrderStatus>,
    ) -> RepoResult<Vec<Order>> {
        let mut orders: Vec<Order> = self
            .db
            .orders
            .iter()
            .filter(|e| client_id.is_none_or(|c| e.value().client_id == c))
            .filter(|e| status.is_none_or(|s| e.value().status == s))
            .map(|e| e.value().clone())
            .collect();
        orders.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(orders)
    }

    /// Overwrite the status and return the updated order
    pub async fn set_status(&self, id: &str, status: OrderStatus) -> RepoResult<Order> {
        let mut entry = self
            .db
            .orders
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {}", id)))?;
        entry.status = status;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    /// Link the payment that settled this order
    pub async fn attach_payment(&self, id: &str, payment_id: &str) -> RepoResult<Order> {
        let mut entry = self
            .db
            .orders
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {}", id)))?;
        entry.payment_id = Some(payment_id.to_string());
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    /// Link the invoice generated for this order
    pub async fn attach_invoice(&self, id: &str, invoice_id: &str) -> RepoResult<Order> {
        let mut entry = self
            .db
            .orders
            .get_mut(id)
            .ok_or_else(|| RepoError::NotFound(format!("Order {}", id)))?;
        entry.invoice_id = Some(invoice_id.to_string());
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    /// Number of persisted orders (test support)
    pub async fn count(&self) -> RepoResult<usize> {
        Ok(self.db.orders.len())
    }
}
