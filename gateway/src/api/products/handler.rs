//! Product proxy handlers

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
use shared::models::{Paginated, Product, ProductCreate, ProductUpdate, StockUpdate};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
    pub category: Option<String>,
}

pub async fn create(
    State(state): State<GatewayState>,
    Json(payload): Json<ProductCreate>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    payload.validate()?;
    let product = state
        .services
        .post(Service::Products, "/api/products", &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn list(
    State(state): State<GatewayState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<Product>>> {
    let mut path = format!(
        "/api/products?limit={}&offset={}",
        query.limit.unwrap_or(10),
        query.offset.unwrap_or(0)
    );
    if let Some(category) = &query.category {
        path.push_str(&format!("&category={}", category));
    }
    let page = state.services.get(Service::Products, &path).await?;
    Ok(Json(page))
}

pub async fn get_by_id(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let product = state
        .services
        .get(Service::Products, &format!("/api/products/{}", id))
        .await?;
    Ok(Json(product))
}

pub async fn update(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    payload.validate()?;
    let product = state
        .services
        .put(Service::Products, &format!("/api/products/{}", id), &payload)
        .await?;
    Ok(Json(product))
}

pub async fn delete(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .services
        .delete(Service::Products, &format!("/api/products/{}", id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn update_stock(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(payload): Json<StockUpdate>,
) -> ApiResult<Json<Product>> {
    let product = state
        .services
        .patch(
            Service::Products,
            &format!("/api/products/{}/stock", id),
            &payload,
        )
        .await?;
    Ok(Json(product))
}
