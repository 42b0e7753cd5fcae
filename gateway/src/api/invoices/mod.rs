//! Invoice proxy module (authenticated)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_auth;
use crate::core::GatewayState;

pub fn router(state: &GatewayState) -> Router<GatewayState> {
    let routes = Router::new()
        .route("/", get(handler::list).post(handler::generate))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api/invoices", routes)
}
