//! Order API Handlers
//!
//! Thin adapters over the [`OrderLedger`]; all pricing and lifecycle
//! logic lives in the service.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::services::OrderLedger;
use crate::utils::validate_payload;
use shared::error::ApiResult;
use shared::models::{Order, OrderCreate, OrderStatus, OrderStatusUpdate};

/// Query params for listing orders; filters are conjunctive
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub client_id: Option<String>,
    pub status: Option<OrderStatus>,
}

/// Create an order
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    validate_payload(&payload)?;
    let ledger = OrderLedger::from_state(&state);
    let order = ledger.create_order(payload).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders, optionally filtered by client and status
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let ledger = OrderLedger::from_state(&state);
    let orders = ledger
        .list_orders(query.client_id.as_deref(), query.status)
        .await?;
    Ok(Json(orders))
}

/// Get order by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let ledger = OrderLedger::from_state(&state);
    let order = ledger.get_order(&id).await?;
    Ok(Json(order))
}

/// Overwrite the order status (transitions are not validated)
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> ApiResult<Json<Order>> {
    let ledger = OrderLedger::from_state(&state);
    let order = ledger.update_status(&id, payload.status).await?;
    Ok(Json(order))
}

/// Cancel an order, whatever its current status
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let ledger = OrderLedger::from_state(&state);
    let order = ledger.cancel_order(&id).await?;
    Ok(Json(order))
}
