//! Menu Item Model

use crate::types::TenantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    /// Price in currency unit (non-negative)
    pub price: Decimal,
    pub available: bool,
    pub description: Option<String>,
    /// Image reference (opaque; rendering is a collaborator concern)
    pub image: Option<String>,
    pub restaurant_id: TenantId,
    pub created_at: i64,
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub available: bool,
    pub description: Option<String>,
    pub image: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}
