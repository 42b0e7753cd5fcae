//! Health API module

mod handler;

use axum::{Router, routing::get};

use crate::core::GatewayState;

pub fn router() -> Router<GatewayState> {
    Router::new().route("/health", get(handler::health))
}
