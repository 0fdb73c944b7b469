//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity — one tenant of the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub address: Option<String>,
    pub logo: Option<String>,
    pub created_at: i64,
}

/// Create restaurant payload (admin provisioning)
///
/// `admin_id` is the user who will be bound to the new restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    pub address: Option<String>,
    pub logo: Option<String>,
    pub admin_id: String,
}
