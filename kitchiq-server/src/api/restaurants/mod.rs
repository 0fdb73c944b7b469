//! Restaurant API Module

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

/// Restaurant router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/restaurants", post(handler::create))
        .route("/api/restaurants/{id}", get(handler::get_by_id))
}
