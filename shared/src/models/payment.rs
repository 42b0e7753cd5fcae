//! Payment Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Accepted payment methods
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Card,
    Paypal,
    BankTransfer,
}

/// Payment status. Forward-only except the explicit refund overwrite.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Processing,
    Completed,
    Failed,
    Refunded,
}

/// Payment entity. References an order by id; does not own it and does
/// not drive its status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Payment {
    pub id: String,
    pub order_id: String,
    /// Amount in currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub status: PaymentStatus,
    pub transaction_id: Option<String>,
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Process payment payload. The amount is verified against the order
/// total before any charge is attempted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentRequest {
    #[validate(length(min = 1, message = "order id is required"))]
    pub order_id: String,
    pub method: PaymentMethod,
    /// Opaque charge token forwarded to the charge gateway
    #[validate(length(min = 1, message = "charge token is required"))]
    pub token: String,
    /// Amount in currency unit
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub metadata: Option<serde_json::Value>,
}
