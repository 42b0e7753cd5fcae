//! Client proxy module
//!
//! Account creation is public (the sign-up path); everything else needs
//! a verified caller. The internal by-email lookup is deliberately not
//! exposed here.

mod handler;

use axum::{Router, middleware, routing::get, routing::post};

use crate::auth::require_auth;
use crate::core::GatewayState;

pub fn router(state: &GatewayState) -> Router<GatewayState> {
    let public = Router::new().route("/", post(handler::create));

    let protected = Router::new()
        .route("/", get(handler::list))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::update)
                .delete(handler::delete),
        )
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api/clients", public.merge(protected))
}
