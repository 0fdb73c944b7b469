//! Authentication Handlers
//!
//! Handles signup, login and admin role management

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::TenantId;
use shared::models::{Role, User, UserPublic};
use shared::util::{now_millis, record_id};

/// Hash a password using argon2
fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
    };

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2.hash_password(password.as_bytes(), &salt)?;
    Ok(password_hash.to_string())
}

/// Verify a password against its argon2 hash
fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    use argon2::{
        Argon2,
        password_hash::{PasswordHash, PasswordVerifier},
    };

    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Signup request payload
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    /// Optional restaurant binding (QR signup flow)
    pub restaurant_id: Option<TenantId>,
}

/// Register a new customer account
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<UserPublic>)> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    if state.store.user_by_email(&payload.email)?.is_some() {
        return Err(AppError::new(ErrorCode::EmailExists));
    }

    let password_hash = hash_password(&payload.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {}", e)))?;

    let user = User {
        id: record_id(),
        email: payload.email,
        name: payload.name,
        password_hash,
        role: Role::Customer,
        restaurant_id: payload.restaurant_id,
        created_at: now_millis(),
    };
    state.store.create_user(&user)?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok((StatusCode::CREATED, Json(user.to_public())))
}

/// Login request payload
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response with JWT token
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserPublic,
}

/// Login handler
///
/// Authenticates user credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::validation(e.to_string()))?;

    let user = state
        .store
        .user_by_email(&payload.email)?
        .ok_or_else(AppError::invalid_credentials)?;

    let password_valid = verify_password(&payload.password, &user.password_hash)
        .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

    if !password_valid {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    }

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {}", e)))?;

    tracing::info!(
        user_id = %user.id,
        role = %user.role,
        "User logged in successfully"
    );

    Ok(Json(LoginResponse {
        token,
        user: user.to_public(),
    }))
}

/// List all users, credentials excluded (admin)
pub async fn list_users(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<UserPublic>>> {
    user.require_admin()?;

    let users = state
        .store
        .list_users()?
        .iter()
        .map(User::to_public)
        .collect();
    Ok(Json(users))
}

/// Role update payload
#[derive(Debug, Deserialize)]
pub struct RoleUpdateRequest {
    pub role: Role,
    pub restaurant_id: Option<TenantId>,
}

/// Update a user's role, optionally binding a restaurant (admin).
///
/// A superadmin may bind any restaurant; a regular admin may only bind
/// users to their own.
pub async fn update_role(
    State(state): State<ServerState>,
    admin: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<RoleUpdateRequest>,
) -> AppResult<Json<UserPublic>> {
    admin.require_admin()?;

    let mut target = state
        .store
        .user_by_id(&id)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    target.role = payload.role;

    if payload.role.is_kitchen()
        && let Some(restaurant_id) = payload.restaurant_id
    {
        let allowed = admin.role == Role::Superadmin
            || admin.restaurant_id.as_ref() == Some(&restaurant_id);
        if !allowed {
            security_log!(
                "WARN",
                "cross_tenant_role_binding_denied",
                admin_id = admin.id.clone(),
                target_restaurant = restaurant_id.to_string()
            );
            return Err(AppError::forbidden(
                "You can only assign users to your own restaurant",
            ));
        }
        target.restaurant_id = Some(restaurant_id);
    }

    state.store.put_user(&target)?;

    tracing::info!(
        admin_id = %admin.id,
        user_id = %target.id,
        role = %target.role,
        "User role updated"
    );

    Ok(Json(target.to_public()))
}
