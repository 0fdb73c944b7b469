//! Inventory API Module
//!
//! All inventory endpoints are kitchen-side and scoped to the caller's
//! restaurant; the manual expiry scan is the operational-testing variant
//! of the scheduled daily run.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Inventory router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/inventory", get(handler::list).post(handler::create))
        .route("/api/inventory/expiring", get(handler::expiring))
        .route("/api/inventory/expiry-scan", post(handler::run_scan))
        .route(
            "/api/inventory/{id}",
            put(handler::update).delete(handler::remove),
        )
}
