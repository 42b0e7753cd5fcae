//! Domain models
//!
//! One module per service, each holding the entity plus its
//! create/update payloads.

pub mod client;
pub mod invoice;
pub mod order;
pub mod payment;
pub mod product;

pub use client::{Client, ClientAuthView, ClientCreate, ClientUpdate};
pub use invoice::{Invoice, InvoiceRequest, InvoiceStatus};
pub use order::{Order, OrderCreate, OrderItem, OrderItemDraft, OrderStatus, OrderStatusUpdate};
pub use payment::{Payment, PaymentMethod, PaymentRequest, PaymentStatus};
pub use product::{Product, ProductCreate, ProductUpdate, StockUpdate};

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Postal address value object, used for client profiles and order shipping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Address {
    #[validate(length(min = 1, message = "street is required"))]
    pub street: String,
    #[validate(length(min = 1, message = "city is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "postal code is required"))]
    pub postal_code: String,
    #[validate(length(min = 1, message = "country is required"))]
    pub country: String,
}

/// Pagination envelope for list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}
