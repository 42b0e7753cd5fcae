//! Composed view handlers
//!
//! Each view starts from one entity and follows the foreign ids stored
//! on it: `Order.client_id` -> client, `Order.payment_id` -> payment,
//! `OrderItem.product_id` -> product, and so on. A missing optional link
//! resolves to `null`; a broken mandatory link fails the whole view.

use axum::{
    Extension, Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::GatewayState;
use crate::downstream::Service;
use shared::error::ApiResult;
use shared::models::{Client, Invoice, Order, OrderItem, Payment, Product};

/// One order line with its product resolved
#[derive(Debug, Serialize)]
pub struct OrderItemView {
    pub item: OrderItem,
    pub product: Product,
}

/// An order with every relation resolved
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub order: Order,
    pub client: Client,
    pub payment: Option<Payment>,
    pub invoice: Option<Invoice>,
    pub items: Vec<OrderItemView>,
}

/// A client with their orders
#[derive(Debug, Serialize)]
pub struct ClientView {
    pub client: Client,
    pub orders: Vec<Order>,
}

/// An invoice with its order and client
#[derive(Debug, Serialize)]
pub struct InvoiceView {
    pub invoice: Invoice,
    pub order: Order,
    pub client: Client,
}

pub async fn order_view(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderView>> {
    let services = &state.services;

    let order: Order = services
        .get(Service::Orders, &format!("/api/orders/{}", id))
        .await?;
    let client: Client = services
        .get(Service::Clients, &format!("/api/clients/{}", order.client_id))
        .await?;

    let payment = match &order.payment_id {
        Some(payment_id) => Some(
            services
                .get::<Payment>(Service::Payments, &format!("/api/payments/{}", payment_id))
                .await?,
        ),
        None => None,
    };
    let invoice = match &order.invoice_id {
        Some(invoice_id) => Some(
            services
                .get::<Invoice>(Service::Invoices, &format!("/api/invoices/{}", invoice_id))
                .await?,
        ),
        None => None,
    };

    let mut items = Vec::with_capacity(order.items.len());
    for item in &order.items {
        let product: Product = services
            .get(
                Service::Products,
                &format!("/api/products/{}", item.product_id),
            )
            .await?;
        items.push(OrderItemView {
            item: item.clone(),
            product,
        });
    }

    Ok(Json(OrderView {
        order,
        client,
        payment,
        invoice,
        items,
    }))
}

pub async fn client_view(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ClientView>> {
    let client: Client = state
        .services
        .get(Service::Clients, &format!("/api/clients/{}", id))
        .await?;
    let orders: Vec<Order> = state
        .services
        .get(Service::Orders, &format!("/api/orders?client_id={}", id))
        .await?;
    Ok(Json(ClientView { client, orders }))
}

pub async fn invoice_view(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<InvoiceView>> {
    let invoice: Invoice = state
        .services
        .get(Service::Invoices, &format!("/api/invoices/{}", id))
        .await?;
    let order: Order = state
        .services
        .get(Service::Orders, &format!("/api/orders/{}", invoice.order_id))
        .await?;
    let client: Client = state
        .services
        .get(
            Service::Clients,
            &format!("/api/clients/{}", invoice.client_id),
        )
        .await?;
    Ok(Json(InvoiceView {
        invoice,
        order,
        client,
    }))
}

/// Orders of the authenticated caller
pub async fn my_orders(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Vec<Order>>> {
    let orders = state
        .services
        .get(Service::Orders, &format!("/api/orders?client_id={}", user.id))
        .await?;
    Ok(Json(orders))
}
