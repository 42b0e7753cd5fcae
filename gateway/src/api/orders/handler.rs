//! Order proxy handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::core::GatewayState;
use crate::downstream::Service;
use shared::error::ApiResult;
use shared::models::{Order, OrderCreate, OrderStatus, OrderStatusUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub client_id: Option<String>,
    pub status: Option<OrderStatus>,
}

pub async fn create(
    State(state): State<GatewayState>,
    Json(payload): Json<OrderCreate>,
) -> ApiResult<(StatusCode, Json<Order>)> {
    payload.validate()?;
    let order = state
        .services
        .post(Service::Orders, "/api/orders", &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(order)))
}

pub async fn list(
    State(state): State<GatewayState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Order>>> {
    let mut params = Vec::new();
    if let Some(client_id) = &query.client_id {
        params.push(format!("client_id={}", client_id));
    }
    if let Some(status) = query.status {
        params.push(format!("status={}", status));
    }
    let mut path = String::from("/api/orders");
    if !params.is_empty() {
        path = format!("{}?{}", path, params.join("&"));
    }
    let orders = state.services.get(Service::Orders, &path).await?;
    Ok(Json(orders))
}

pub async fn get_by_id(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let order = state
        .services
        .get(Service::Orders, &format!("/api/orders/{}", id))
        .await?;
    Ok(Json(order))
}

pub async fn update_status(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> ApiResult<Json<Order>> {
    let order = state
        .services
        .patch(
            Service::Orders,
            &format!("/api/orders/{}/status", id),
            &payload,
        )
        .await?;
    Ok(Json(order))
}

pub async fn cancel(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Order>> {
    let order = state
        .services
        .post(
            Service::Orders,
            &format!("/api/orders/{}/cancel", id),
            &serde_json::json!({}),
        )
        .await?;
    Ok(Json(order))
}
