//! Pizza catalog API

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/pizzas", routes())
}

fn routes() -> Router<ServerState> {
    Router::new().route("/", get(handler::list))
}
