//! Invoice proxy handlers

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
use shared::models::{Invoice, InvoiceRequest};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub client_id: Option<String>,
}

pub async fn generate(
    State(state): State<GatewayState>,
    Json(payload): Json<InvoiceRequest>,
) -> ApiResult<(StatusCode, Json<Invoice>)> {
    payload.validate()?;
    let invoice = state
        .services
        .post(Service::Invoices, "/api/invoices", &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(invoice)))
}

pub async fn list(
    State(state): State<GatewayState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Invoice>>> {
    let path = match &query.client_id {
        Some(client_id) => format!("/api/invoices?client_id={}", client_id),
        None => "/api/invoices".to_string(),
    };
    let invoices = state.services.get(Service::Invoices, &path).await?;
    Ok(Json(invoices))
}

pub async fn get_by_id(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Invoice>> {
    let invoice = state
        .services
        .get(Service::Invoices, &format!("/api/invoices/{}", id))
        .await?;
    Ok(Json(invoice))
}
