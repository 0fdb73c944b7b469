//! Auth API Module
//!
//! Signup, login (JWT issuance) and admin-side user management.

mod handler;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::core::ServerState;

/// Auth router
pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/auth/signup", post(handler::signup))
        .route("/api/auth/login", post(handler::login))
        .route("/api/auth/users", get(handler::list_users))
        .route("/api/auth/role/{id}", put(handler::update_role))
}
