//! Invoice API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::services::InvoiceGenerator;
use crate::utils::validate_payload;
use shared::error::ApiResult;
use shared::models::{Invoice, InvoiceRequest};

/// Query params for listing invoices
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub client_id: Option<String>,
}

/// Generate an invoice for an order
pub async fn generate(
    State(state): State<ServerState>,
    Json(payload): Json<InvoiceRequest>,
) -> ApiResult<(StatusCode, Json<Invoice>)> {
    validate_payload(&payload)?;
    let generator = InvoiceGenerator::from_state(&state);
    let invoice = generator.generate_invoice(&payload.order_id).await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

/// List invoices, optionally for one client
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Invoice>>> {
    let generator = InvoiceGenerator::from_state(&state);
    let invoices = generator.list_invoices(query.client_id.as_deref()).await?;
    Ok(Json(invoices))
}

/// Get invoice by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Invoice>> {
    let generator = InvoiceGenerator::from_state(&state);
    let invoice = generator.get_invoice(&id).await?;
    Ok(Json(invoice))
}
