//! Payment proxy handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::core::GatewayState;
use crate::downstream::Service;
use shared::error::ApiResult;
use shared::models::{Payment, PaymentRequest};

pub async fn process(
    State(state): State<GatewayState>,
    Json(payload): Json<PaymentRequest>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    payload.validate()?;
    let payment = state
        .services
        .post(Service::Payments, "/api/payments", &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

pub async fn get_by_id(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    let payment = state
        .services
        .get(Service::Payments, &format!("/api/payments/{}", id))
        .await?;
    Ok(Json(payment))
}

pub async fn refund(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    let payment = state
        .services
        .post(
            Service::Payments,
            &format!("/api/payments/{}/refund", id),
            &serde_json::json!({}),
        )
        .await?;
    Ok(Json(payment))
}
