//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::auth::{Caller, CurrentUser, resolve_tenant};
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::TenantId;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use shared::util::{now_millis, record_id};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub restaurant_id: Option<TenantId>,
}

fn ensure_valid_price(price: Decimal) -> AppResult<()> {
    if price < Decimal::ZERO {
        return Err(AppError::new(ErrorCode::MenuItemInvalidPrice));
    }
    Ok(())
}

/// List a restaurant's menu (auth optional; diners browse by QR hint)
pub async fn list(
    State(state): State<ServerState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<MenuItem>>> {
    let tenant = resolve_tenant(&caller, query.restaurant_id.as_ref())?;
    let items = state.store.list_menu_items(&tenant)?;
    Ok(Json(items))
}

/// Create a menu item in the caller's restaurant (staff/admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    ensure_valid_price(payload.price)?;

    let item = MenuItem {
        id: record_id(),
        name: payload.name,
        price: payload.price,
        available: payload.available,
        description: payload.description,
        image: payload.image,
        restaurant_id: tenant,
        created_at: now_millis(),
    };
    state.store.put_menu_item(&item)?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Update a menu item within the caller's restaurant (staff/admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(patch): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    let mut item = state
        .store
        .menu_item_scoped(&id, &tenant)?
        .ok_or_else(|| AppError::new(ErrorCode::MenuItemNotFound))?;

    if let Some(price) = patch.price {
        ensure_valid_price(price)?;
        item.price = price;
    }
    if let Some(name) = patch.name {
        item.name = name;
    }
    if let Some(available) = patch.available {
        item.available = available;
    }
    if let Some(description) = patch.description {
        item.description = Some(description);
    }
    if let Some(image) = patch.image {
        item.image = Some(image);
    }

    state.store.put_menu_item(&item)?;
    Ok(Json(item))
}

/// Delete a menu item within the caller's restaurant (staff/admin)
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    if !state.store.delete_menu_item(&id, &tenant)? {
        return Err(AppError::new(ErrorCode::MenuItemNotFound));
    }

    Ok(Json(ApiResponse::ok()))
}
