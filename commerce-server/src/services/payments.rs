//! Payment Processor
//!
//! Records payment attempts against an order and drives them to
//! COMPLETED or FAILED through the [`ChargeGateway`] capability. The
//! processor never touches order status; it only links the payment id
//! back onto the order for relation resolution.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::core::ServerState;
use crate::db::repository::PaymentRepository;
use crate::events::EventBus;
use crate::services::ledger::OrderLedger;
use shared::error::{ApiError, ApiResult};
use shared::events::{self, topics};
use shared::models::{Payment, PaymentRequest, PaymentStatus};

/// Charge failure raised by the gateway capability
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct ChargeError(pub String);

/// Opaque charging capability (card processor, PSP, ...)
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    /// Attempt to charge; returns the provider transaction id
    async fn charge(&self, token: &str, amount: Decimal) -> Result<String, ChargeError>;
}

/// Stand-in gateway that accepts every charge. Production wiring swaps
/// in a real provider behind the same trait.
pub struct SimulatedChargeGateway;

#[async_trait]
impl ChargeGateway for SimulatedChargeGateway {
    async fn charge(&self, _token: &str, _amount: Decimal) -> Result<String, ChargeError> {
        Ok(format!("txn_{}", shared::util::now_millis()))
    }
}

#[derive(Clone)]
pub struct PaymentProcessor {
    payments: PaymentRepository,
    ledger: OrderLedger,
    gateway: Arc<dyn ChargeGateway>,
    events: EventBus,
}

impl PaymentProcessor {
    pub fn new(
        payments: PaymentRepository,
        ledger: OrderLedger,
        gateway: Arc<dyn ChargeGateway>,
        events: EventBus,
    ) -> Self {
        Self {
            payments,
            ledger,
            gateway,
            events,
        }
    }

    pub fn from_state(state: &ServerState) -> Self {
        Self::new(
            PaymentRepository::new(state.db.clone()),
            OrderLedger::from_state(state),
            state.charge_gateway.clone(),
            state.events.clone(),
        )
    }

    /// Record and execute a payment attempt against an order.
    ///
    /// The order is fetched through the ledger and the caller-asserted
    /// amount must equal the order total; mismatches are rejected before
    /// any row is written or charge attempted. On charge success the
    /// payment completes and `payment.processed` is published; on charge
    /// failure the payment is marked FAILED, `payment.failed` is
    /// published, and the decline is returned to the caller.
    pub async fn process_payment(&self, request: PaymentRequest) -> ApiResult<Payment> {
        let order = self.ledger.get_order(&request.order_id).await?;
        if request.amount != order.total {
            return Err(ApiError::validation(format!(
                "payment amount {} does not match order total {}",
                request.amount, order.total
            )));
        }

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4().to_string(),
            order_id: request.order_id.clone(),
            amount: request.amount,
            method: request.method,
            status: PaymentStatus::Processing,
            transaction_id: None,
            metadata: request.metadata.clone(),
            created_at: now,
            updated_at: now,
        };
        let payment = self.payments.create(payment).await?;

        match self.gateway.charge(&request.token, request.amount).await {
            Ok(transaction_id) => {
                let payment = self
                    .payments
                    .transition(&payment.id, PaymentStatus::Completed, Some(transaction_id))
                    .await?;
                self.notify(
                    topics::PAYMENT_PROCESSED,
                    events::PaymentProcessed {
                        id: payment.id.clone(),
                        order_id: payment.order_id.clone(),
                        status: payment.status,
                    },
                );
                if let Err(e) = self
                    .ledger
                    .attach_payment(&payment.order_id, &payment.id)
                    .await
                {
                    tracing::warn!(order_id = %payment.order_id, error = %e, "failed to link payment to order");
                }
                tracing::info!(payment_id = %payment.id, order_id = %payment.order_id, "payment processed");
                Ok(payment)
            }
            Err(e) => {
                let payment = self
                    .payments
                    .transition(&payment.id, PaymentStatus::Failed, None)
                    .await?;
                self.notify(
                    topics::PAYMENT_FAILED,
                    events::PaymentFailed {
                        id: payment.id.clone(),
                        order_id: payment.order_id.clone(),
                    },
                );
                tracing::warn!(payment_id = %payment.id, order_id = %payment.order_id, error = %e, "charge declined");
                Err(ApiError::payment_declined(e.to_string()))
            }
        }
    }

    /// Mark a payment refunded and publish `payment.refunded`.
    ///
    /// The overwrite is unconditional: no check that the payment ever
    /// completed.
    pub async fn refund_payment(&self, id: &str) -> ApiResult<Payment> {
        let payment = self
            .payments
            .transition(id, PaymentStatus::Refunded, None)
            .await?;
        self.notify(
            topics::PAYMENT_REFUNDED,
            events::PaymentRefunded {
                id: payment.id.clone(),
            },
        );
        tracing::info!(payment_id = %payment.id, "payment refunded");
        Ok(payment)
    }

    pub async fn get_payment(&self, id: &str) -> ApiResult<Payment> {
        self.payments
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("Payment {}", id)))
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
    use crate::db::repository::{OrderRepository, ProductRepository};
    use crate::db::{Database, Repository, Store};
    use crate::services::catalog::StoreCatalog;
    use shared::models::{Address, OrderCreate, OrderItemDraft, PaymentMethod, ProductCreate};

    struct DecliningGateway;

    #[async_trait]
    impl ChargeGateway for DecliningGateway {
        async fn charge(&self, _token: &str, _amount: Decimal) -> Result<String, ChargeError> {
            Err(ChargeError("card declined".into()))
        }
    }

    async fn seed_order(db: &Database, events: &EventBus, price: Decimal) -> String {
        let products = ProductRepository::new(db.clone());
        let product = products
            .create(ProductCreate {
                name: "Widget".into(),
                description: None,
                price,
                stock: Some(5),
                category: "test".into(),
                images: None,
                attributes: None,
            })
            .await
            .unwrap();
        let ledger = OrderLedger::new(
            OrderRepository::new(db.clone()),
            Arc::new(StoreCatalog::new(db.clone())),
            events.clone(),
        );
        let order = ledger
            .create_order(OrderCreate {
                client_id: "c1".into(),
                items: vec![OrderItemDraft {
                    product_id: product.id,
                    quantity: 1,
                }],
                shipping_address: Address {
                    street: "1 Main St".into(),
                    city: "Lyon".into(),
                    postal_code: "69001".into(),
                    country: "FR".into(),
                },
            })
            .await
            .unwrap();
        order.id
    }

    fn processor(db: &Database, events: &EventBus, gateway: Arc<dyn ChargeGateway>) -> PaymentProcessor {
        PaymentProcessor::new(
            PaymentRepository::new(db.clone()),
            OrderLedger::new(
                OrderRepository::new(db.clone()),
                Arc::new(StoreCatalog::new(db.clone())),
                events.clone(),
            ),
            gateway,
            events.clone(),
        )
    }

    fn request_for(order_id: &str, amount: Decimal) -> PaymentRequest {
        PaymentRequest {
            order_id: order_id.into(),
            method: PaymentMethod::Card,
            token: "tok_test".into(),
            amount,
            metadata: None,
        }
    }

    #[tokio::test]
    async fn successful_charge_completes_the_payment() {
        let db = Store::shared();
        let events = EventBus::new();
        let order_id = seed_order(&db, &events, Decimal::new(2550, 2)).await;
        let processor = processor(&db, &events, Arc::new(SimulatedChargeGateway));

        let payment = processor
            .process_payment(request_for(&order_id, Decimal::new(2550, 2)))
            .await
            .unwrap();

        assert_eq!(payment.status, PaymentStatus::Completed);
        assert!(payment.transaction_id.as_deref().unwrap().starts_with("txn_"));

        // The payment id is linked back onto the order.
        let order = OrderRepository::new(db.clone())
            .find_by_id(&order_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(order.payment_id.as_deref(), Some(payment.id.as_str()));
    }

    #[tokio::test]
    async fn declined_charge_fails_the_payment_and_emits() {
        let db = Store::shared();
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let order_id = seed_order(&db, &events, Decimal::new(2550, 2)).await;
        let processor = processor(&db, &events, Arc::new(DecliningGateway));

        let err = processor
            .process_payment(request_for(&order_id, Decimal::new(2550, 2)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::PaymentDeclined(_)));

        let mut failed_payload = None;
        while let Ok(event) = rx.try_recv() {
            assert_ne!(event.topic, topics::PAYMENT_PROCESSED);
            if event.topic == topics::PAYMENT_FAILED {
                failed_payload = Some(event.parse_payload::<events::PaymentFailed>().unwrap());
            }
        }
        let failed = failed_payload.expect("payment.failed not published");
        assert_eq!(failed.order_id, order_id);

        let payment = PaymentRepository::new(db.clone())
            .find_by_id(&failed.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(payment.status, PaymentStatus::Failed);
        assert!(payment.transaction_id.is_none());
    }

    #[tokio::test]
    async fn amount_mismatch_is_rejected_before_any_charge() {
        let db = Store::shared();
        let events = EventBus::new();
        let order_id = seed_order(&db, &events, Decimal::new(2550, 2)).await;
        // A declining gateway would turn the payment FAILED if it were
        // reached; the mismatch must stop earlier.
        let processor = processor(&db, &events, Arc::new(DecliningGateway));

        let err = processor
            .process_payment(request_for(&order_id, Decimal::new(100, 2)))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        assert!(db.payments.is_empty());
    }

    #[tokio::test]
    async fn refund_is_unconditional() {
        let db = Store::shared();
        let events = EventBus::new();
        let order_id = seed_order(&db, &events, Decimal::new(2550, 2)).await;
        let declining = processor(&db, &events, Arc::new(DecliningGateway));

        // Even a FAILED payment can be refunded: pure status overwrite.
        let _ = declining
            .process_payment(request_for(&order_id, Decimal::new(2550, 2)))
            .await;
        let payment_id = db.payments.iter().next().unwrap().key().clone();

        let refunded = declining.refund_payment(&payment_id).await.unwrap();
        assert_eq!(refunded.status, PaymentStatus::Refunded);
    }
}
