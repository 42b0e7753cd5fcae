//! Domain events
//!
//! Fire-and-forget notifications published after a state change commits.
//! Delivery is best-effort and advisory: consumers get no ordering,
//! acknowledgment or replay guarantees.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::OrderStatus;
use crate::util::now_millis;

/// Event topic names
pub mod topics {
    pub const CLIENT_CREATED: &str = "client.created";
    pub const CLIENT_UPDATED: &str = "client.updated";
    pub const CLIENT_DELETED: &str = "client.deleted";

    pub const PRODUCT_CREATED: &str = "product.created";
    pub const PRODUCT_UPDATED: &str = "product.updated";
    pub const PRODUCT_DELETED: &str = "product.deleted";
    pub const PRODUCT_STOCK_UPDATED: &str = "product.stock.updated";

    pub const ORDER_CREATED: &str = "order.created";
    pub const ORDER_STATUS_UPDATED: &str = "order.status.updated";
    pub const ORDER_CANCELLED: &str = "order.cancelled";

    pub const PAYMENT_PROCESSED: &str = "payment.processed";
    pub const PAYMENT_FAILED: &str = "payment.failed";
    pub const PAYMENT_REFUNDED: &str = "payment.refunded";

    pub const INVOICE_GENERATED: &str = "invoice.generated";
}

/// An event on the bus: topic name plus JSON payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainEvent {
    pub topic: String,
    pub payload: serde_json::Value,
    /// Publication timestamp (epoch millis)
    pub occurred_at: i64,
}

impl DomainEvent {
    pub fn new(topic: &str, payload: impl Serialize) -> Result<Self, serde_json::Error> {
        Ok(Self {
            topic: topic.to_string(),
            payload: serde_json::to_value(payload)?,
            occurred_at: now_millis(),
        })
    }

    /// Deserialize the payload into a typed event struct
    pub fn parse_payload<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}

// ==================== Payloads ====================
//
// Payload keys are camelCase on the wire.

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientCreated {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientUpdated {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientDeleted {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreated {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdated {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDeleted {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductStockUpdated {
    pub id: String,
    pub stock: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub id: String,
    pub order_number: String,
    pub client_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderStatusUpdated {
    pub id: String,
    pub status: OrderStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCancelled {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentProcessed {
    pub id: String,
    pub order_id: String,
    pub status: crate::models::PaymentStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentFailed {
    pub id: String,
    pub order_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRefunded {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceGenerated {
    pub id: String,
    pub order_id: String,
    pub invoice_number: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_keys_are_camel_case() {
        let event = DomainEvent::new(
            topics::ORDER_CREATED,
            OrderCreated {
                id: "o1".into(),
                order_number: "ORD-1-ABCDEFGHI".into(),
                client_id: "c1".into(),
                total: Decimal::new(2550, 2),
            },
        )
        .unwrap();

        assert_eq!(event.topic, "order.created");
        assert!(event.payload.get("orderNumber").is_some());
        assert!(event.payload.get("clientId").is_some());

        let parsed: OrderCreated = event.parse_payload().unwrap();
        assert_eq!(parsed.total, Decimal::new(2550, 2));
    }
}
