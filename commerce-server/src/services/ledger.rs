//! Order Ledger
//!
//! Owns the order aggregate lifecycle: creation (pricing + total
//! computation + persistence), status transitions and cancellation.
//! Depends on the [`Catalog`] seam for pricing and on the event bus for
//! lifecycle notifications.

use std::sync::Arc;

use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::OrderRepository;
use crate::events::EventBus;
use crate::services::catalog::{Catalog, StoreCatalog};
use shared::error::{ApiError, ApiResult};
use shared::events::{self, topics};
use shared::models::{Order, OrderCreate, OrderItem, OrderStatus};
use shared::util;

#[derive(Clone)]
pub struct OrderLedger {
    orders: OrderRepository,
    catalog: Arc<dyn Catalog>,
    events: EventBus,
}

impl OrderLedger {
    pub fn new(orders: OrderRepository, catalog: Arc<dyn Catalog>, events: EventBus) -> Self {
        Self {
            orders,
            catalog,
            events,
        }
    }

    /// Ledger wired to the server's own store and bus
    pub fn from_state(state: &ServerState) -> Self {
        Self::new(
            OrderRepository::new(state.db.clone()),
            Arc::new(StoreCatalog::new(state.db.clone())),
            state.events.clone(),
        )
    }

    /// Create an order.
    ///
    /// Every line is priced against the current catalog record, in input
    /// order; unit prices and line totals are frozen copies, not
    /// references. Pricing happens before anything is persisted, so a
    /// failed lookup aborts the whole operation with no partial state.
    /// The aggregate (order + items) is then written as one unit and
    /// `order.created` is published fire-and-forget.
    pub async fn create_order(&self, data: OrderCreate) -> ApiResult<Order> {
        if data.items.is_empty() {
            return Err(ApiError::validation("order needs at least one item"));
        }

        let mut total = Decimal::ZERO;
        let mut items = Vec::with_capacity(data.items.len());
        for draft in &data.items {
            if draft.quantity == 0 {
                return Err(ApiError::validation("quantity must be positive"));
            }
            let product = self.catalog.product(&draft.product_id).await?;
            let line_total = product.price * Decimal::from(draft.quantity);
            total += line_total;
            items.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                product_id: draft.product_id.clone(),
                quantity: draft.quantity,
                price: product.price,
                total: line_total,
            });
        }

        let now = Utc::now();
        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: util::order_number(),
            client_id: data.client_id,
            status: OrderStatus::Pending,
            total,
            shipping_address: data.shipping_address,
            payment_id: None,
            invoice_id: None,
            items,
            created_at: now,
            updated_at: now,
        };
        let order = self.orders.create(order).await?;

        self.notify(
            topics::ORDER_CREATED,
            events::OrderCreated {
                id: order.id.clone(),
                order_number: order.order_number.clone(),
                client_id: order.client_id.clone(),
                total: order.total,
            },
        );
        tracing::info!(order_id = %order.id, order_number = %order.order_number, total = %order.total, "order created");

        Ok(order)
    }

    pub async fn get_order(&self, id: &str) -> ApiResult<Order> {
        self.orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Order {}", id)))
    }

    /// List orders; filters are conjunctive, absence means unconstrained
    pub async fn list_orders(
        &self,
        client_id: Option<&str>,
        status: Option<OrderStatus>,
    ) -> ApiResult<Vec<Order>> {
        Ok(self.orders.find_filtered(client_id, status).await?)
    }

    /// Persist a new status and publish `order.status.updated`.
    ///
    /// Transitions are not validated: any status may follow any other.
    pub async fn update_status(&self, id: &str, status: OrderStatus) -> ApiResult<Order> {
        let order = self.orders.set_status(id, status).await?;
        self.notify(
            topics::ORDER_STATUS_UPDATED,
            events::OrderStatusUpdated {
                id: order.id.clone(),
                status: order.status,
            },
        );
        tracing::info!(order_id = %order.id, status = %order.status, "order status updated");
        Ok(order)
    }

    /// Overwrite the status with CANCELLED regardless of what it was and
    /// publish `order.cancelled`. Every call emits a fresh event, even on
    /// an already-cancelled order. No compensation is triggered against
    /// payments or stock.
    pub async fn cancel_order(&self, id: &str) -> ApiResult<Order> {
        let order = self.orders.set_status(id, OrderStatus::Cancelled).await?;
        self.notify(
            topics::ORDER_CANCELLED,
            events::OrderCancelled {
                id: order.id.clone(),
            },
        );
        tracing::info!(order_id = %order.id, "order cancelled");
        Ok(order)
    }

    /// Link the payment that settled this order
    pub async fn attach_payment(&self, id: &str, payment_id: &str) -> ApiResult<Order> {
        Ok(self.orders.attach_payment(id, payment_id).await?)
    }

    /// Link the invoice generated for this order
    pub async fn attach_invoice(&self, id: &str, invoice_id: &str) -> ApiResult<Order> {
        Ok(self.orders.attach_invoice(id, invoice_id).await?)
    }

    fn notify(&self, topic: &str, payload: impl Serialize) {
        if let Err(e) = self.events.publish(topic, payload) {
            tracing::warn!(topic, error = %e, "event publish failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ProductRepository;
    use crate::db::{Database, Repository, Store};
    use crate::services::catalog::CatalogError;
    use async_trait::async_trait;
    use shared::models::{Address, OrderItemDraft, ProductCreate};

    struct UnavailableCatalog;

    #[async_trait]
    impl Catalog for UnavailableCatalog {
        async fn product(&self, _id: &str) -> Result<shared::models::Product, CatalogError> {
            Err(CatalogError::Unavailable("connection refused".into()))
        }
    }

    fn address() -> Address {
        Address {
            street: "1 Rue de Rivoli".into(),
            city: "Paris".into(),
            postal_code: "75001".into(),
            country: "FR".into(),
        }
    }

    async fn seed_product(db: &Database, name: &str, price: Decimal) -> String {
        let repo = ProductRepository::new(db.clone());
        let product = repo
            .create(ProductCreate {
                name: name.into(),
                description: None,
                price,
                stock: Some(10),
                category: "test".into(),
                images: None,
                attributes: None,
            })
            .await
            .unwrap();
        product.id
    }

    fn ledger_for(db: &Database, events: &EventBus) -> OrderLedger {
        OrderLedger::new(
            OrderRepository::new(db.clone()),
            Arc::new(StoreCatalog::new(db.clone())),
            events.clone(),
        )
    }

    #[tokio::test]
    async fn total_is_the_sum_of_frozen_line_totals() {
        let db = Store::shared();
        let events = EventBus::new();
        let p1 = seed_product(&db, "Widget", Decimal::new(1000, 2)).await;
        let p2 = seed_product(&db, "Gadget", Decimal::new(550, 2)).await;
        let ledger = ledger_for(&db, &events);

        let order = ledger
            .create_order(OrderCreate {
                client_id: "c1".into(),
                items: vec![
                    OrderItemDraft {
                        product_id: p1.clone(),
                        quantity: 2,
                    },
                    OrderItemDraft {
                        product_id: p2,
                        quantity: 1,
                    },
                ],
                shipping_address: address(),
            })
            .await
            .unwrap();

        assert_eq!(order.total, Decimal::new(2550, 2));
        assert_eq!(order.items.len(), 2);
        assert_eq!(order.items[0].total, Decimal::new(2000, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.order_number.starts_with("ORD-"));

        // A later catalog price change must not leak into the snapshot.
        let products = ProductRepository::new(db.clone());
        products
            .update(
                &p1,
                shared::models::ProductUpdate {
                    price: Some(Decimal::new(9999, 2)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let reread = ledger.get_order(&order.id).await.unwrap();
        assert_eq!(reread.total, Decimal::new(2550, 2));
        assert_eq!(reread.items[0].price, Decimal::new(1000, 2));
    }

    #[tokio::test]
    async fn unknown_product_aborts_without_persisting() {
        let db = Store::shared();
        let events = EventBus::new();
        let p1 = seed_product(&db, "Widget", Decimal::new(1000, 2)).await;
        let ledger = ledger_for(&db, &events);

        let err = ledger
            .create_order(OrderCreate {
                client_id: "c1".into(),
                items: vec![
                    OrderItemDraft {
                        product_id: p1,
                        quantity: 1,
                    },
                    OrderItemDraft {
                        product_id: "missing".into(),
                        quantity: 3,
                    },
                ],
                shipping_address: address(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::NotFound(_)));
        let orders = OrderRepository::new(db.clone());
        assert_eq!(orders.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn empty_item_list_is_rejected() {
        let db = Store::shared();
        let events = EventBus::new();
        let ledger = ledger_for(&db, &events);

        let err = ledger
            .create_order(OrderCreate {
                client_id: "c1".into(),
                items: vec![],
                shipping_address: address(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Validation(_)));
        let orders = OrderRepository::new(db.clone());
        assert_eq!(orders.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn catalog_outage_maps_to_dependency_error() {
        let db = Store::shared();
        let events = EventBus::new();
        let ledger = OrderLedger::new(
            OrderRepository::new(db.clone()),
            Arc::new(UnavailableCatalog),
            events.clone(),
        );

        let err = ledger
            .create_order(OrderCreate {
                client_id: "c1".into(),
                items: vec![OrderItemDraft {
                    product_id: "p1".into(),
                    quantity: 1,
                }],
                shipping_address: address(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Dependency { .. }));
        let orders = OrderRepository::new(db.clone());
        assert_eq!(orders.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn cancel_overwrites_any_status_and_always_emits() {
        let db = Store::shared();
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let p1 = seed_product(&db, "Widget", Decimal::new(100, 2)).await;
        let ledger = ledger_for(&db, &events);

        let order = ledger
            .create_order(OrderCreate {
                client_id: "c1".into(),
                items: vec![OrderItemDraft {
                    product_id: p1,
                    quantity: 1,
                }],
                shipping_address: address(),
            })
            .await
            .unwrap();

        // Deliberately permissive: DELIVERED can still be cancelled.
        ledger
            .update_status(&order.id, OrderStatus::Delivered)
            .await
            .unwrap();
        let cancelled = ledger.cancel_order(&order.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        // Cancelling again keeps the status and emits another event.
        let cancelled = ledger.cancel_order(&order.id).await.unwrap();
        assert_eq!(cancelled.status, OrderStatus::Cancelled);

        let mut cancelled_events = 0;
        while let Ok(event) = rx.try_recv() {
            if event.topic == topics::ORDER_CANCELLED {
                cancelled_events += 1;
            }
        }
        assert_eq!(cancelled_events, 2);
    }

    #[tokio::test]
    async fn list_filters_are_conjunctive() {
        let db = Store::shared();
        let events = EventBus::new();
        let p1 = seed_product(&db, "Widget", Decimal::new(100, 2)).await;
        let ledger = ledger_for(&db, &events);

        for client in ["c1", "c1", "c2"] {
            ledger
                .create_order(OrderCreate {
                    client_id: client.into(),
                    items: vec![OrderItemDraft {
                        product_id: p1.clone(),
                        quantity: 1,
                    }],
                    shipping_address: address(),
                })
                .await
                .unwrap();
        }
        let all = ledger.list_orders(None, None).await.unwrap();
        let c1_pending = ledger
            .list_orders(Some("c1"), Some(OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(c1_pending.len(), 2);

        ledger.cancel_order(&c1_pending[0].id).await.unwrap();
        let c1_after = ledger
            .list_orders(Some("c1"), Some(OrderStatus::Pending))
            .await
            .unwrap();
        assert_eq!(c1_after.len(), 1);
    }
}
