//! Payment proxy module
//!
//! Processing and reads need a verified caller; refunds are admin-only.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{require_admin, require_auth};
use crate::core::GatewayState;

pub fn router(state: &GatewayState) -> Router<GatewayState> {
    let authenticated = Router::new()
        .route("/", post(handler::process))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    let admin = Router::new()
        .route("/{id}/refund", post(handler::refund))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api/payments", authenticated.merge(admin))
}
