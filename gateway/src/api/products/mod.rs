//! Product proxy module
//!
//! Catalog reads are public; catalog mutations (including stock) require
//! the admin role.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::auth::{require_admin, require_auth};
use crate::core::GatewayState;

pub fn router(state: &GatewayState) -> Router<GatewayState> {
    let public = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id));

    let admin = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/stock", patch(handler::update_stock))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api/products", public.merge(admin))
}
