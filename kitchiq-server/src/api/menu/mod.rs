//! Menu API Module

mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

/// Menu router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/menu", get(handler::list).post(handler::create))
        .route(
            "/api/menu/{id}",
            put(handler::update).delete(handler::remove),
        )
}
