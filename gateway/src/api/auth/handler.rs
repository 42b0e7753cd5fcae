//! Auth API Handlers
//!
//! Registration and login run against the clients service; the gateway
//! owns password hashing and token issuance.

use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::{CurrentUser, hash_password, verify_password};
use crate::core::GatewayState;
use crate::downstream::Service;
use shared::error::{ApiError, ApiResult};
use shared::models::{Client, ClientAuthView, ClientCreate};

/// Registration payload
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
}

/// Login payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// Client fields echoed back with a token
#[derive(Debug, Serialize)]
pub struct ClientSummary {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Token response
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub client: ClientSummary,
}

/// Register a new client and issue a token
pub async fn register(
    State(state): State<GatewayState>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    payload.validate()?;

    let create = ClientCreate {
        email: payload.email,
        password: hash_password(&payload.password)?,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
        role: None,
        address: None,
    };
    let client: Client = state
        .services
        .post(Service::Clients, "/api/clients", &create)
        .await?;

    let token = state
        .jwt
        .generate_token(&client.id, &client.email, &client.role)?;
    tracing::info!(client_id = %client.id, "client registered");

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Registration successful".to_string(),
            token,
            client: ClientSummary {
                id: client.id,
                email: client.email,
                first_name: client.first_name,
                last_name: client.last_name,
            },
        }),
    ))
}

/// Verify credentials and issue a token.
///
/// Unknown email and wrong password produce the same error, so accounts
/// cannot be enumerated.
pub async fn login(
    State(state): State<GatewayState>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    payload.validate()?;

    let auth: ClientAuthView = match state
        .services
        .get(
            Service::Clients,
            &format!("/api/clients/by-email/{}", payload.email),
        )
        .await
    {
        Ok(view) => view,
        Err(ApiError::NotFound(_)) => return Err(ApiError::invalid_credentials()),
        Err(e) => return Err(e),
    };

    if !verify_password(&payload.password, &auth.password) {
        return Err(ApiError::invalid_credentials());
    }

    let token = state.jwt.generate_token(&auth.id, &auth.email, &auth.role)?;
    tracing::info!(client_id = %auth.id, "client logged in");

    Ok(Json(AuthResponse {
        message: "Login successful".to_string(),
        token,
        client: ClientSummary {
            id: auth.id,
            email: auth.email,
            first_name: auth.first_name,
            last_name: auth.last_name,
        },
    }))
}

/// Profile of the authenticated caller
pub async fn me(
    State(state): State<GatewayState>,
    Extension(user): Extension<CurrentUser>,
) -> ApiResult<Json<Client>> {
    let client: Client = state
        .services
        .get(Service::Clients, &format!("/api/clients/{}", user.id))
        .await?;
    Ok(Json(client))
}
