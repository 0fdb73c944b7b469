//! Inventory Item Model

use crate::types::TenantId;
use serde::{Deserialize, Serialize};

/// Inventory item entity
///
/// The core concern is expiry proximity: `expiry_date` is an epoch-millis
/// timestamp compared against a rolling two-day window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
    /// Quantity on hand (non-negative)
    pub quantity: u32,
    pub unit: Option<String>,
    /// Expiry timestamp (Unix milliseconds)
    pub expiry_date: i64,
    pub restaurant_id: TenantId,
    pub created_at: i64,
}

/// Create inventory item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItemCreate {
    pub name: String,
    pub quantity: u32,
    pub unit: Option<String>,
    pub expiry_date: i64,
}

/// Update inventory item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date: Option<i64>,
}

/// An inventory item classified as expiring soon, with the day count
/// the kitchen sees ("1 day left")
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpiringItem {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub days_left: i64,
}
