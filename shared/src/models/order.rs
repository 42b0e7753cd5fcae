//! Order Model
//!
//! The order is the aggregate root: line items are owned by the order,
//! persisted and deleted with it as one unit.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Address;

/// Order lifecycle status.
///
/// Transitions are deliberately unvalidated: any status may follow any
/// other, and cancellation overwrites whatever was there before.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    #[default]
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
            Self::Processing => "PROCESSING",
            Self::Shipped => "SHIPPED",
            Self::Delivered => "DELIVERED",
            Self::Cancelled => "CANCELLED",
        };
        write!(f, "{}", s)
    }
}

/// Order line item. Unit price is a frozen copy of the catalog price at
/// order-creation time, not a reference to the product record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub product_id: String,
    pub quantity: u32,
    /// Unit price captured at order time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// quantity x unit price
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub order_number: String,
    pub client_id: String,
    pub status: OrderStatus,
    /// Sum of line totals, frozen at creation
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub shipping_address: Address,
    pub payment_id: Option<String>,
    pub invoice_id: Option<String>,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One requested line in an order-creation payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemDraft {
    #[validate(length(min = 1, message = "product id is required"))]
    pub product_id: String,
    #[validate(range(min = 1, message = "quantity must be positive"))]
    pub quantity: u32,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderCreate {
    #[validate(length(min = 1, message = "client id is required"))]
    pub client_id: String,
    #[validate(length(min = 1, message = "order needs at least one item"), nested)]
    pub items: Vec<OrderItemDraft>,
    #[validate(nested)]
    pub shipping_address: Address,
}

/// Status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
