//! Invoice Model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Invoice status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Issued,
    Paid,
    Cancelled,
}

/// Invoice entity. Financial fields are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub invoice_number: String,
    pub order_id: String,
    pub client_id: String,
    /// Order total at generation time
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    /// subtotal x tax rate, rounded to 2 decimals
    #[serde(with = "rust_decimal::serde::float")]
    pub tax: Decimal,
    /// subtotal + tax
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    pub status: InvoiceStatus,
    pub pdf_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Generate invoice payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct InvoiceRequest {
    #[validate(length(min = 1, message = "order id is required"))]
    pub order_id: String,
}
