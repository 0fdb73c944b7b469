//! Order Model

use crate::types::TenantId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order status — a strictly forward state machine.
///
/// `pending → preparing → ready → completed`; the kitchen may jump a
/// stage forward, but no transition re-enters an earlier stage and
/// nothing leaves `completed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Completed,
}

impl OrderStatus {
    const fn rank(&self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Preparing => 1,
            OrderStatus::Ready => 2,
            OrderStatus::Completed => 3,
        }
    }

    /// Whether `target` is a legal forward transition
    pub const fn can_transition_to(&self, target: OrderStatus) -> bool {
        target.rank() > self.rank()
    }

    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Completed => "completed",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderType {
    #[default]
    DineIn,
    Takeaway,
    Delivery,
}

/// One ordered line: a menu item reference and a quantity (>= 1)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item: String,
    pub quantity: u32,
}

/// Order entity — the central scoped record.
///
/// `restaurant_id` never changes after creation. Attribution is one of:
/// authenticated customer id/email, or guest name + table number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub restaurant_id: TenantId,
    pub items: Vec<OrderLine>,
    pub order_type: OrderType,
    pub status: OrderStatus,
    pub customer_id: Option<String>,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    /// Client-computed total, persisted as given
    pub total: Option<Decimal>,
    pub created_at: i64,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub order_type: OrderType,
    /// Explicit initial status, accepted as-is when present
    pub status: Option<OrderStatus>,
    pub customer_name: Option<String>,
    pub table_number: Option<String>,
    pub delivery_address: Option<String>,
    pub total: Option<Decimal>,
    /// Restaurant hint for guests; an authenticated restaurant binding wins
    pub restaurant_id: Option<TenantId>,
}

/// Update order payload (staff/admin)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderLine>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}
