//! HTTP API
//!
//! Route composition. Each resource module exposes a `router()`; admin
//! routes carry credentials in every request body instead of a session.

pub mod admin;
pub mod auth;
pub mod nights;
pub mod orders;
pub mod pizzas;

use axum::{Router, routing::get};

use crate::core::ServerState;
use crate::utils::ApiResponse;

pub fn router() -> Router<ServerState> {
    Router::new()
        .merge(auth::router())
        .merge(nights::router())
        .merge(pizzas::router())
        .merge(orders::router())
        .merge(admin::router())
        .route("/api/health", get(health))
}

async fn health() -> ApiResponse<()> {
    ApiResponse::ok()
}
