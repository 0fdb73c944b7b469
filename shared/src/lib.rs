//! Shared types for the KitchIQ platform
//!
//! Common types used across crates: data models, error types,
//! response structures, the tenant id type, and small utilities.

pub mod error;
pub mod models;
pub mod types;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
pub use types::TenantId;
