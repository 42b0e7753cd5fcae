//! Error types for the platform
//!
//! Standardized error taxonomy shared by every service and the gateway.
//! Each variant maps to one HTTP status and one stable error code string.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tracing::error;

/// Whether error responses carry the diagnostic `detail` field.
///
/// Enabled by default (development); production startup turns it off.
static EXPOSE_DETAILS: AtomicBool = AtomicBool::new(true);

/// Toggle diagnostic detail in error payloads. Call once at startup.
pub fn set_expose_details(expose: bool) {
    EXPOSE_DETAILS.store(expose, Ordering::Relaxed);
}

fn expose_details() -> bool {
    EXPOSE_DETAILS.load(Ordering::Relaxed)
}

/// Standard API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorCode {
    /// Validation error (400)
    Validation,
    /// Invalid request (400)
    Invalid,
    /// Authentication required (401)
    Unauthorized,
    /// Invalid token (401)
    InvalidToken,
    /// Token expired (401)
    TokenExpired,
    /// Charge attempt declined (402)
    PaymentDeclined,
    /// Permission denied (403)
    Forbidden,
    /// Resource not found (404)
    NotFound,
    /// Resource already exists (409)
    Conflict,
    /// Internal server error (500)
    Internal,
    /// Storage error (500)
    Database,
    /// Downstream collaborator unavailable (502)
    Dependency,
}

impl ApiErrorCode {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation => StatusCode::BAD_REQUEST,
            Self::Invalid => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::UNAUTHORIZED,
            Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::PaymentDeclined => StatusCode::PAYMENT_REQUIRED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Database => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Dependency => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the default message for this error
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Validation => "Validation failed",
            Self::Invalid => "Invalid request",
            Self::Unauthorized => "Authentication required",
            Self::InvalidToken => "Invalid token",
            Self::TokenExpired => "Token expired",
            Self::PaymentDeclined => "Payment declined",
            Self::Forbidden => "Permission denied",
            Self::NotFound => "Resource not found",
            Self::Conflict => "Resource already exists",
            Self::Internal => "Internal server error",
            Self::Database => "Storage error",
            Self::Dependency => "Dependency unavailable",
        }
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation => "E0002",
            Self::NotFound => "E0003",
            Self::Conflict => "E0004",
            Self::Invalid => "E0006",
            Self::Forbidden => "E2001",
            Self::Unauthorized => "E3001",
            Self::InvalidToken => "E3002",
            Self::TokenExpired => "E3003",
            Self::PaymentDeclined => "E5001",
            Self::Internal => "E9001",
            Self::Database => "E9002",
            Self::Dependency => "E9003",
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Wire format of an error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Stable error code (`E0003` etc.)
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Diagnostic detail, omitted in production
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Unified error type for the platform
#[derive(Debug, Error)]
pub enum ApiError {
    /// Validation error
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    Invalid(String),

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Invalid token
    #[error("Invalid token")]
    InvalidToken,

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Charge attempt declined
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness violation
    #[error("{0} already exists")]
    Conflict(String),

    /// Storage error
    #[error("Storage error: {0}")]
    Database(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// A collaborator service failed or timed out
    #[error("Service {service} unavailable: {message}")]
    Dependency { service: String, message: String },
}

impl ApiError {
    // ========== Convenient constructors ==========

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden(message.into())
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound(resource.into())
    }

    pub fn conflict(resource: impl Into<String>) -> Self {
        Self::Conflict(resource.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    pub fn payment_declined(message: impl Into<String>) -> Self {
        Self::PaymentDeclined(message.into())
    }

    pub fn dependency(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Dependency {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Unified message for failed logins, prevents account enumeration
    pub fn invalid_credentials() -> Self {
        Self::Invalid("Invalid email or password".to_string())
    }

    // ========== Error inspection ==========

    /// Get the error code for this error
    pub fn error_code(&self) -> ApiErrorCode {
        match self {
            Self::Validation(_) => ApiErrorCode::Validation,
            Self::Invalid(_) => ApiErrorCode::Invalid,
            Self::Unauthorized => ApiErrorCode::Unauthorized,
            Self::InvalidToken => ApiErrorCode::InvalidToken,
            Self::TokenExpired => ApiErrorCode::TokenExpired,
            Self::PaymentDeclined(_) => ApiErrorCode::PaymentDeclined,
            Self::Forbidden(_) => ApiErrorCode::Forbidden,
            Self::NotFound(_) => ApiErrorCode::NotFound,
            Self::Conflict(_) => ApiErrorCode::Conflict,
            Self::Database(_) => ApiErrorCode::Database,
            Self::Internal(_) => ApiErrorCode::Internal,
            Self::Dependency { .. } => ApiErrorCode::Dependency,
        }
    }

    /// Get the HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        self.error_code().status_code()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        ApiError::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        let status = code.status_code();

        // Server-side failures keep a generic client message, the cause
        // goes to the log and to `detail` outside production.
        let (message, detail) = if status.is_server_error() {
            error!(code = %code, error = %self, "request failed");
            let detail = expose_details().then(|| self.to_string());
            (code.default_message().to_string(), detail)
        } else {
            (self.to_string(), None)
        };

        let body = ErrorBody {
            code: code.code().to_string(),
            message,
            detail,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        assert_eq!(
            ApiError::not_found("Order").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::conflict("Client").status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::Unauthorized.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            ApiError::forbidden("admin only").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::payment_declined("card declined").status_code(),
            StatusCode::PAYMENT_REQUIRED
        );
        assert_eq!(
            ApiError::dependency("catalog", "connection refused").status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn error_codes_are_stable() {
        assert_eq!(ApiError::validation("x").error_code().code(), "E0002");
        assert_eq!(ApiError::Unauthorized.error_code().code(), "E3001");
        assert_eq!(
            ApiError::dependency("orders", "down").error_code().code(),
            "E9003"
        );
    }
}
