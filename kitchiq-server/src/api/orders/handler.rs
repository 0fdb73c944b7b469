//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use http::StatusCode;
use serde::Deserialize;

use crate::auth::{Caller, CurrentUser, resolve_tenant};
use crate::core::ServerState;
use crate::orders::{lifecycle, visibility};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::TenantId;
use shared::models::{Order, OrderCreate, OrderUpdate};

/// Query params for order listings
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub restaurant_id: Option<TenantId>,
    pub table_number: Option<String>,
}

/// List orders visible to the caller (auth optional)
pub async fn list(
    State(state): State<ServerState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let tenant = resolve_tenant(&caller, query.restaurant_id.as_ref())?;
    let filter = visibility::list_filter(&caller, query.table_number.as_deref())?;

    let orders = state.store.list_orders(&tenant, &filter)?;
    Ok(Json(orders))
}

/// The caller's own orders — attributed by identity, never role-widened
pub async fn my_orders(
    State(state): State<ServerState>,
    caller: Caller,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let tenant = resolve_tenant(&caller, query.restaurant_id.as_ref())?;
    let filter = visibility::my_orders_filter(&caller, query.table_number.as_deref())?;

    let orders = state.store.list_orders(&tenant, &filter)?;
    Ok(Json(orders))
}

/// Create an order (QR guest or logged-in caller)
pub async fn create(
    State(state): State<ServerState>,
    caller: Caller,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let tenant = resolve_tenant(&caller, payload.restaurant_id.as_ref())?;
    let order = lifecycle::build_order(payload, &caller, tenant)?;

    state.store.put_order(&order)?;

    tracing::info!(
        order_id = %order.id,
        restaurant_id = %order.restaurant_id,
        order_type = ?order.order_type,
        "Order created"
    );

    Ok((StatusCode::CREATED, Json(order)))
}

/// Update an order within the caller's restaurant (staff/admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(patch): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    // A miss and a foreign-restaurant order are indistinguishable here
    let mut order = state
        .store
        .order_scoped(&id, &tenant)?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

    lifecycle::apply_update(&mut order, patch)?;
    state.store.put_order(&order)?;

    Ok(Json(order))
}

/// Delete an order within the caller's restaurant (staff/admin)
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    if !state.store.delete_order(&id, &tenant)? {
        return Err(AppError::new(ErrorCode::OrderNotFound));
    }

    Ok(Json(ApiResponse::ok()))
}
