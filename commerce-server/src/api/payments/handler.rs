//! Payment API Handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::core::ServerState;
use crate::services::PaymentProcessor;
use crate::utils::validate_payload;
use shared::error::ApiResult;
use shared::models::{Payment, PaymentRequest};

/// Process a payment against an order
pub async fn process(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentRequest>,
) -> ApiResult<(StatusCode, Json<Payment>)> {
    validate_payload(&payload)?;
    let processor = PaymentProcessor::from_state(&state);
    let payment = processor.process_payment(payload).await?;
    Ok((StatusCode::CREATED, Json(payment)))
}

/// Get payment by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    let processor = PaymentProcessor::from_state(&state);
    let payment = processor.get_payment(&id).await?;
    Ok(Json(payment))
}

/// Refund a payment (unconditional status overwrite)
pub async fn refund(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Payment>> {
    let processor = PaymentProcessor::from_state(&state);
    let payment = processor.refund_payment(&id).await?;
    Ok(Json(payment))
}
