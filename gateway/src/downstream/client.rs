//! Typed HTTP client for the downstream services
//!
//! Every gateway operation maps to exactly one downstream call through
//! this client. Transport failures surface as `Dependency` (502);
//! downstream error envelopes are translated back into the shared
//! taxonomy by their stable error code.

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::error::{ApiError, ApiResult, ErrorBody};

/// Per-service base URLs. Each service can live on its own host; the
/// default wiring points all of them at one commerce-server process.
#[derive(Debug, Clone)]
pub struct ServiceUrls {
    pub clients: String,
    pub products: String,
    pub orders: String,
    pub payments: String,
    pub invoices: String,
}

impl ServiceUrls {
    /// All services behind one base URL
    pub fn single(base: &str) -> Self {
        Self {
            clients: base.to_string(),
            products: base.to_string(),
            orders: base.to_string(),
            payments: base.to_string(),
            invoices: base.to_string(),
        }
    }

    /// Load per-service URLs from the environment
    pub fn from_env() -> Self {
        let default = "http://localhost:3001".to_string();
        Self {
            clients: std::env::var("CLIENTS_SERVICE_URL").unwrap_or_else(|_| default.clone()),
            products: std::env::var("PRODUCTS_SERVICE_URL").unwrap_or_else(|_| default.clone()),
            orders: std::env::var("ORDERS_SERVICE_URL").unwrap_or_else(|_| default.clone()),
            payments: std::env::var("PAYMENTS_SERVICE_URL").unwrap_or_else(|_| default.clone()),
            invoices: std::env::var("INVOICES_SERVICE_URL").unwrap_or_else(|_| default),
        }
    }
}

/// Logical downstream service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Clients,
    Products,
    Orders,
    Payments,
    Invoices,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Payments => "payments",
            Self::Invoices => "invoices",
        }
    }
}

/// Shared HTTP client over the downstream services
#[derive(Debug, Clone)]
pub struct ServiceClient {
    http: reqwest::Client,
    urls: ServiceUrls,
}

impl ServiceClient {
    /// Build the client. Called once at startup; the reqwest client is
    /// reused for every call.
    pub fn new(urls: ServiceUrls) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build downstream http client");
        Self { http, urls }
    }

    fn base_url(&self, service: Service) -> &str {
        match service {
            Service::Clients => &self.urls.clients,
            Service::Products => &self.urls.products,
            Service::Orders => &self.urls.orders,
            Service::Payments => &self.urls.payments,
            Service::Invoices => &self.urls.invoices,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, service: Service, path: &str) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url(service), path);
        let response = self.http.get(&url).send().await;
        Self::handle(service, response).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url(service), path);
        let response = self.http.post(&url).json(body).send().await;
        Self::handle(service, response).await
    }

    pub async fn put<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url(service), path);
        let response = self.http.put(&url).json(body).send().await;
        Self::handle(service, response).await
    }

    pub async fn patch<T: DeserializeOwned>(
        &self,
        service: Service,
        path: &str,
        body: &impl Serialize,
    ) -> ApiResult<T> {
        let url = format!("{}{}", self.base_url(service), path);
        let response = self.http.patch(&url).json(body).send().await;
        Self::handle(service, response).await
    }

    pub async fn delete(&self, service: Service, path: &str) -> ApiResult<()> {
        let url = format!("{}{}", self.base_url(service), path);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .map_err(|e| ApiError::dependency(service.name(), e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = Self::error_body(response, status).await;
        Err(Self::map_error(service, status.as_u16(), body))
    }

    async fn handle<T: DeserializeOwned>(
        service: Service,
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> ApiResult<T> {
        let response =
            response.map_err(|e| ApiError::dependency(service.name(), e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response.json::<T>().await.map_err(|e| {
                ApiError::dependency(service.name(), format!("invalid response body: {}", e))
            });
        }
        let body = Self::error_body(response, status).await;
        Err(Self::map_error(service, status.as_u16(), body))
    }

    async fn error_body(response: reqwest::Response, status: reqwest::StatusCode) -> ErrorBody {
        response.json::<ErrorBody>().await.unwrap_or(ErrorBody {
            code: String::new(),
            message: status.to_string(),
            detail: None,
        })
    }

    /// Translate a downstream error envelope back into the taxonomy.
    /// Stable error codes are authoritative; the HTTP status is the
    /// fallback for responses that did not carry one.
    fn map_error(service: Service, status: u16, body: ErrorBody) -> ApiError {
        let message = body.message;
        match (body.code.as_str(), status) {
            ("E0002", _) | (_, 400) => ApiError::validation(message),
            ("E0003", _) | (_, 404) => {
                ApiError::NotFound(message.trim_end_matches(" not found").to_string())
            }
            ("E0004", _) | (_, 409) => {
                ApiError::Conflict(message.trim_end_matches(" already exists").to_string())
            }
            ("E5001", _) | (_, 402) => ApiError::payment_declined(message),
            ("E0006", _) => ApiError::invalid(message),
            _ => ApiError::dependency(service.name(), format!("status {}: {}", status, message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(code: &str, message: &str) -> ErrorBody {
        ErrorBody {
            code: code.to_string(),
            message: message.to_string(),
            detail: None,
        }
    }

    #[test]
    fn downstream_codes_pass_through() {
        let err = ServiceClient::map_error(Service::Orders, 404, body("E0003", "Order o1 not found"));
        assert!(matches!(err, ApiError::NotFound(ref r) if r == "Order o1"));

        let err = ServiceClient::map_error(
            Service::Clients,
            409,
            body("E0004", "Client with email a@b.c already exists"),
        );
        assert!(matches!(err, ApiError::Conflict(_)));

        let err = ServiceClient::map_error(Service::Payments, 402, body("E5001", "card declined"));
        assert!(matches!(err, ApiError::PaymentDeclined(_)));
    }

    #[test]
    fn unknown_failures_become_dependency_errors() {
        let err = ServiceClient::map_error(Service::Orders, 500, body("", "boom"));
        assert!(matches!(err, ApiError::Dependency { .. }));
        assert_eq!(
            err.status_code(),
            http::StatusCode::BAD_GATEWAY,
            "downstream 5xx surfaces as 502"
        );
    }
}
