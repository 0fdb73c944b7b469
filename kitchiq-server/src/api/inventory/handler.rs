//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use http::StatusCode;
use serde::Serialize;

use crate::auth::{Caller, CurrentUser, resolve_tenant};
use crate::core::ServerState;
use crate::inventory::{ScanOutcome, expiry};
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};
use shared::models::{ExpiringItem, InventoryItem, InventoryItemCreate, InventoryItemUpdate};
use shared::util::{now_millis, record_id};

/// List inventory for the caller's restaurant (staff/admin)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<InventoryItem>>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    let items = state.store.list_inventory(&tenant)?;
    Ok(Json(items))
}

/// Create an inventory item in the caller's restaurant (staff/admin)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<InventoryItemCreate>,
) -> AppResult<(StatusCode, Json<InventoryItem>)> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    let item = InventoryItem {
        id: record_id(),
        name: payload.name,
        quantity: payload.quantity,
        unit: payload.unit,
        expiry_date: payload.expiry_date,
        restaurant_id: tenant,
        created_at: now_millis(),
    };
    state.store.put_inventory_item(&item)?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// Update an inventory item within the caller's restaurant (staff/admin)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(patch): Json<InventoryItemUpdate>,
) -> AppResult<Json<InventoryItem>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    let mut item = state
        .store
        .inventory_item_scoped(&id, &tenant)?
        .ok_or_else(|| AppError::new(ErrorCode::InventoryItemNotFound))?;

    if let Some(name) = patch.name {
        item.name = name;
    }
    if let Some(quantity) = patch.quantity {
        item.quantity = quantity;
    }
    if let Some(unit) = patch.unit {
        item.unit = Some(unit);
    }
    if let Some(expiry_date) = patch.expiry_date {
        item.expiry_date = expiry_date;
    }

    state.store.put_inventory_item(&item)?;
    Ok(Json(item))
}

/// Delete an inventory item within the caller's restaurant (staff/admin)
pub async fn remove(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<()>>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    if !state.store.delete_inventory_item(&id, &tenant)? {
        return Err(AppError::new(ErrorCode::InventoryItemNotFound));
    }

    Ok(Json(ApiResponse::ok()))
}

/// Items expiring within the lookahead window, scoped to the caller's
/// restaurant. Shares its classification with the scheduled scan.
pub async fn expiring(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<ExpiringItem>>> {
    user.require_kitchen()?;
    let caller = Caller::Authenticated(user);
    let tenant = resolve_tenant(&caller, None)?;

    let items = state.store.list_inventory(&tenant)?;
    let expiring = expiry::expiring_items(items, now_millis());
    Ok(Json(expiring))
}

/// Manual scan report
#[derive(Debug, Serialize)]
pub struct ScanReport {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scanned: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiring: Option<usize>,
}

/// Trigger the global expiry scan on demand (admin, operational testing).
/// Runs the identical scan as the daily schedule; a trigger that lands
/// while a scan is in flight is dropped.
pub async fn run_scan(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ScanReport>> {
    user.require_admin()?;

    let report = match state.expiry.run_scan()? {
        ScanOutcome::Completed { scanned, expiring } => ScanReport {
            status: "completed",
            scanned: Some(scanned),
            expiring: Some(expiring),
        },
        ScanOutcome::Skipped => ScanReport {
            status: "skipped",
            scanned: None,
            expiring: None,
        },
    };

    Ok(Json(report))
}
