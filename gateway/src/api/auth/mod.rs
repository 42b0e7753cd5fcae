//! Auth API module

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_auth;
use crate::core::GatewayState;

pub fn router(state: &GatewayState) -> Router<GatewayState> {
    let protected = Router::new()
        .route("/me", get(handler::me))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest(
        "/api/auth",
        Router::new()
            .route("/register", post(handler::register))
            .route("/login", post(handler::login))
            .merge(protected),
    )
}
