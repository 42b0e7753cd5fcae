//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::Repository;
use crate::db::repository::ProductRepository;
use crate::utils::validate_payload;
use shared::error::{ApiError, ApiResult};
use shared::events::{self, topics};
use shared::models::{Paginated, Product, ProductCreate, ProductUpdate, StockUpdate};

/// Query params for listing products
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
    pub category: Option<String>,
}

fn default_limit() -> usize {
    10
}

/// Create a product
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    validate_payload(&payload)?;
    if payload.price.is_sign_negative() {
        return Err(ApiError::validation("price cannot be negative"));
    }
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await?;

    state.publish_event(
        topics::PRODUCT_CREATED,
        events::ProductCreated {
            id: product.id.clone(),
            name: product.name.clone(),
        },
    );
    tracing::info!(product_id = %product.id, "product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// List products (paginated, optional category filter)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<Product>>> {
    let repo = ProductRepository::new(state.db.clone());
    let (data, total) = repo
        .find_all(query.limit, query.offset, query.category.as_deref())
        .await?;
    Ok(Json(Paginated {
        data,
        total,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// Get product by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product {}", id)))?;
    Ok(Json(product))
}

/// Update a product
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> ApiResult<Json<Product>> {
    validate_payload(&payload)?;
    if payload.price.is_some_and(|p| p.is_sign_negative()) {
        return Err(ApiError::validation("price cannot be negative"));
    }
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await?;

    state.publish_event(
        topics::PRODUCT_UPDATED,
        events::ProductUpdated {
            id: product.id.clone(),
        },
    );
    tracing::info!(product_id = %product.id, "product updated");

    Ok(Json(product))
}

/// Delete a product
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = ProductRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.publish_event(topics::PRODUCT_DELETED, events::ProductDeleted { id });

    Ok(StatusCode::NO_CONTENT)
}

/// Set the absolute stock level.
///
/// Stock is managed explicitly and is not coupled to order creation.
pub async fn update_stock(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StockUpdate>,
) -> ApiResult<Json<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo.set_stock(&id, payload.quantity).await?;

    state.publish_event(
        topics::PRODUCT_STOCK_UPDATED,
        events::ProductStockUpdated {
            id: product.id.clone(),
            stock: product.stock,
        },
    );

    Ok(Json(product))
}
