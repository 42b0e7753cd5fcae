//! Client API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::Repository;
use crate::db::repository::ClientRepository;
use crate::utils::validate_payload;
use shared::error::{ApiError, ApiResult};
use shared::events::{self, topics};
use shared::models::{Client, ClientAuthView, ClientCreate, ClientUpdate, Paginated};

/// Query params for listing clients
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    10
}

/// Create a client. Duplicate email yields 409.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ClientCreate>,
) -> ApiResult<(StatusCode, Json<Client>)> {
    validate_payload(&payload)?;
    let repo = ClientRepository::new(state.db.clone());
    let client = repo.create(payload).await?;

    state.publish_event(
        topics::CLIENT_CREATED,
        events::ClientCreated {
            id: client.id.clone(),
            email: client.email.clone(),
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
        },
    );
    tracing::info!(client_id = %client.id, "client created");

    Ok((StatusCode::CREATED, Json(client)))
}

/// List clients (paginated)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Paginated<Client>>> {
    let repo = ClientRepository::new(state.db.clone());
    let (data, total) = repo.find_all(query.limit, query.offset).await?;
    Ok(Json(Paginated {
        data,
        total,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// Get client by id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Client>> {
    let repo = ClientRepository::new(state.db.clone());
    let client = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Client {}", id)))?;
    Ok(Json(client))
}

/// Get client by email, including the credential hash.
///
/// Internal route: only the gateway calls it, during login.
pub async fn get_by_email(
    State(state): State<ServerState>,
    Path(email): Path<String>,
) -> ApiResult<Json<ClientAuthView>> {
    let repo = ClientRepository::new(state.db.clone());
    let client = repo
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Client {}", email)))?;
    Ok(Json(ClientAuthView::from(&client)))
}

/// Update a client profile (email and password are not updatable here)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ClientUpdate>,
) -> ApiResult<Json<Client>> {
    validate_payload(&payload)?;
    let repo = ClientRepository::new(state.db.clone());
    let client = repo.update(&id, payload).await?;

    state.publish_event(
        topics::CLIENT_UPDATED,
        events::ClientUpdated {
            id: client.id.clone(),
        },
    );
    tracing::info!(client_id = %client.id, "client updated");

    Ok(Json(client))
}

/// Delete a client
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let repo = ClientRepository::new(state.db.clone());
    repo.delete(&id).await?;

    state.publish_event(topics::CLIENT_DELETED, events::ClientDeleted { id });

    Ok(StatusCode::NO_CONTENT)
}
