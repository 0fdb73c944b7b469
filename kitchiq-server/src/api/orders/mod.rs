//! Order API Module
//!
//! Reads resolve a visibility predicate from the caller identity;
//! mutations are kitchen-side only and scoped to the caller's restaurant.

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Order router
pub fn router() -> Router<ServerState> {
    Router::new()
        // Listing (auth optional) and creation (no auth required)
        .route("/api/orders", get(handler::list).post(handler::create))
        // The caller's own orders
        .route("/api/orders/my", get(handler::my_orders))
        // Staff-side mutations
        .route(
            "/api/orders/{id}",
            put(handler::update).delete(handler::remove),
        )
}
