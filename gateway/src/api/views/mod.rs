//! Composed view module (authenticated)
//!
//! Read endpoints that resolve relation fields with follow-up calls to
//! the owning services, one call per field. Deliberately sequential and
//! unbatched: the resolution cost is proportional to the relations
//! requested.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_auth;
use crate::core::GatewayState;

pub fn router(state: &GatewayState) -> Router<GatewayState> {
    let routes = Router::new()
        .route("/orders/{id}", get(handler::order_view))
        .route("/clients/{id}", get(handler::client_view))
        .route("/invoices/{id}", get(handler::invoice_view))
        .route("/me/orders", get(handler::my_orders))
        .layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new().nest("/api/views", routes)
}
