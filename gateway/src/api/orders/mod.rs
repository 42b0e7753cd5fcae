//! Order proxy module (authenticated)

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post},
};

use crate::auth::require_auth;
use crate::core::GatewayState;

pub fn router(state: &GatewayState) -> Router<GatewayState> {
    let routes = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", patch(handler::update_status))
        .route("/{id}/cancel", post(handler::cancel))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api/orders", routes)
}
