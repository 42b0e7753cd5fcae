//! Client proxy handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use validator::Validate;

use crate::auth::hash_password;
use crate::core::GatewayState;
use crate::downstream::Service;
use shared::error::ApiResult;
use shared::models::{Client, ClientCreate, ClientUpdate, Paginated};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Create a client account. The password is hashed here; the directory
/// only ever stores the hash.
pub async fn create(
    State(state): State<GatewayState>,
    Json(mut payload): Json<ClientCreate>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    payload.validate()?;
    payload.password = hash_password(&payload.password)?;
    // Roles are assigned out of band, never by the sign-up payload.
    payload.role = None;

    let client: Client = state
        .services
        .post(Service::Clients, "/api/clients", &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(client)))
}

pub async fn list(
    State(state): State<GatewayState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<Client>>> {
    let path = format!(
        "/api/clients?limit={}&offset={}",
        query.limit.unwrap_or(10),
        query.offset.unwrap_or(0)
    );
    let page = state.services.get(Service::Clients, &path).await?;
    Ok(Json(page))
}

pub async fn get_by_id(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Client>> {
    let client = state
        .services
        .get(Service::Clients, &format!("/api/clients/{}", id))
        .await?;
    Ok(Json(client))
}

pub async fn update(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> ApiResult<Json<Client>> {
    payload.validate()?;
    let client = state
        .services
        .put(Service::Clients, &format!("/api/clients/{}", id), &payload)
        .await?;
    Ok(Json(client))
}

pub async fn delete(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .services
        .delete(Service::Clients, &format!("/api/clients/{}", id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
