//! Restaurant API Handlers
//!
//! Admin provisioning: creating a restaurant also binds the named admin
//! user to the new tenant.

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult, ErrorCode};
use shared::TenantId;
use shared::models::{Restaurant, RestaurantCreate, UserPublic};
use shared::util::{now_millis, record_id};

#[derive(Debug, Serialize)]
pub struct RestaurantCreated {
    pub restaurant: Restaurant,
    pub user: UserPublic,
}

/// Provision a restaurant and bind its admin (admin/superadmin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RestaurantCreate>,
) -> AppResult<(StatusCode, Json<RestaurantCreated>)> {
    user.require_admin()?;

    if payload.name.trim().is_empty() {
        return Err(AppError::validation("Restaurant name is required"));
    }

    let mut admin = state
        .store
        .user_by_id(&payload.admin_id)?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let restaurant = Restaurant {
        id: record_id(),
        name: payload.name,
        address: payload.address,
        logo: payload.logo,
        created_at: now_millis(),
    };
    state.store.put_restaurant(&restaurant)?;

    admin.restaurant_id = Some(TenantId::new(restaurant.id.clone()));
    state.store.put_user(&admin)?;

    tracing::info!(
        restaurant_id = %restaurant.id,
        admin_id = %admin.id,
        "Restaurant provisioned"
    );

    Ok((
        StatusCode::CREATED,
        Json(RestaurantCreated {
            restaurant,
            user: admin.to_public(),
        }),
    ))
}

/// Public restaurant info (QR landing page)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Restaurant>> {
    let restaurant = state
        .store
        .restaurant_by_id(&id)?
        .ok_or_else(|| AppError::new(ErrorCode::TenantNotFound))?;
    Ok(Json(restaurant))
}
