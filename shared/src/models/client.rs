//! Client Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Address;

/// Default role assigned to new accounts
pub const ROLE_CLIENT: &str = "client";
/// Role required for privileged gateway mutations
pub const ROLE_ADMIN: &str = "admin";

/// Client entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub email: String,
    /// Argon2 hash; never serialized in regular responses
    #[serde(skip_serializing, default)]
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub address: Option<Address>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Credential view returned only by the internal by-email lookup,
/// consumed by the gateway during login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientAuthView {
    pub id: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&Client> for ClientAuthView {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.clone(),
            email: client.email.clone(),
            password: client.password.clone(),
            role: client.role.clone(),
            first_name: client.first_name.clone(),
            last_name: client.last_name.clone(),
        }
    }
}

/// Create client payload. The password arrives already hashed (the
/// gateway hashes before calling the clients service).
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ClientCreate {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "first name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    #[validate(nested)]
    pub address: Option<Address>,
}

/// Update client payload. Email and password are deliberately not
/// updatable through this operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ClientUpdate {
    #[validate(length(min = 1, message = "first name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "last name cannot be empty"))]
    pub last_name: Option<String>,
    pub phone: Option<String>,
    #[validate(nested)]
    pub address: Option<Address>,
}
