//! Gateway routing
//!
//! # Structure
//!
//! - [`health`] - liveness check (public)
//! - [`auth`] - register / login / me
//! - [`clients`] - client directory proxy
//! - [`products`] - catalog proxy (reads public, writes admin)
//! - [`orders`] - order ledger proxy (authenticated)
//! - [`payments`] - payment proxy (refund is admin)
//! - [`invoices`] - invoice proxy (authenticated)
//! - [`views`] - composed reads resolving relations with follow-up calls

use axum::Router;
use http::{HeaderName, HeaderValue};
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::GatewayState;

pub mod auth;
pub mod clients;
pub mod health;
pub mod invoices;
pub mod orders;
pub mod payments;
pub mod products;
pub mod views;

/// Custom request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        Some(RequestId::new(HeaderValue::from_str(&id).unwrap()))
    }
}

/// Build a router with all routes registered.
///
/// The state is needed up front because the auth middleware layers are
/// bound per sub-router.
pub fn build_router(state: &GatewayState) -> Router<GatewayState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router(state))
        .merge(clients::router(state))
        .merge(products::router(state))
        .merge(orders::router(state))
        .merge(payments::router(state))
        .merge(invoices::router(state))
        .merge(views::router(state))
}

/// Build the fully configured application with middleware and state
pub fn build_app(state: GatewayState) -> Router {
    build_router(&state)
        // CORS - handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - request logging at INFO level
        .layer(TraceLayer::new_for_http())
        // Request ID - generate a unique ID per request and echo it back
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        .with_state(state)
}
