//! KitchIQ Order Server — multi-tenant restaurant ordering engine
//!
//! # Architecture Overview
//!
//! The server resolves, for every request, who is calling and which
//! restaurant's data they may touch, then executes against the embedded
//! store:
//!
//! - **Identity** (`auth`): JWT + Argon2; anonymous callers degrade to a
//!   guest identity built from explicit request parameters only
//! - **Tenant scoping** (`auth::scope`): exactly one restaurant id per
//!   operation, resolved with a fixed precedence
//! - **Order engine** (`orders`): visibility predicates and the
//!   forward-only status machine
//! - **Inventory expiry** (`inventory`): shared classification used by the
//!   scoped read and the daily background scan
//! - **Store** (`store`): redb-backed persistence for all collections
//! - **HTTP API** (`api`): RESTful interface
//!
//! # Module Structure
//!
//! ```text
//! kitchiq-server/src/
//! ├── core/          # config, state, server, background tasks
//! ├── auth/          # JWT, caller identity, tenant scope guard
//! ├── orders/        # visibility resolution, lifecycle rules
//! ├── inventory/     # expiry classification, scheduled scan
//! ├── store/         # embedded redb storage
//! ├── api/           # HTTP routes and handlers
//! └── utils/         # logging, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod inventory;
pub mod orders;
pub mod store;
pub mod utils;

// Re-export public types
pub use auth::{Caller, CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use store::Store;
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured events on the "security" target
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env and initialize logging. Call once at process start.
pub fn setup_environment() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    __ __ _ __       __    ________
   / //_/(_) /______/ /_  /  _/ __ \
  / ,<  / / __/ ___/ __ \ / // / / /
 / /| |/ / /_/ /__/ / / // // /_/ /
/_/ |_/_/\__/\___/_/ /_/___/\___\_\
    "#
    );
}
