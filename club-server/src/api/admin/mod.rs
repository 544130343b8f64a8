//! Admin API
//!
//! Every route takes credentials in the request body and re-verifies them
//! against the admin registry; no session, no middleware-cached identity.

mod handler;

use axum::{Router, routing::post};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/admin", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        // Kitchen display and order lifecycle
        .route("/orders/list", post(handler::list_orders))
        .route("/orders/{id}/status", post(handler::update_order_status))
        .route("/orders/{id}/cancel", post(handler::cancel_order))
        // Slot locks
        .route("/slot-locks", post(handler::set_slot_lock))
        .route("/slot-locks/list", post(handler::list_slot_locks))
        // Menu management
        .route("/pizzas", post(handler::create_pizza))
        .route("/pizzas/{id}/update", post(handler::update_pizza))
        .route("/pizzas/{id}/delete", post(handler::delete_pizza))
        // Member roster
        .route("/members/list", post(handler::list_members))
}
