//! User Model

use crate::types::TenantId;
use serde::{Deserialize, Serialize};

/// User role
///
/// A closed set: visibility and mutation rights are derived from the
/// variant, never from free-form strings scattered through handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Staff,
    Admin,
    Superadmin,
}

impl Role {
    /// Kitchen-side roles: may see and mutate every order in their restaurant
    pub const fn is_kitchen(&self) -> bool {
        matches!(self, Role::Staff | Role::Admin)
    }

    /// Administrative roles: may manage users and provision restaurants
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Staff => "staff",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// User entity
///
/// `restaurant_id` is required for staff/admin, absent for customers until
/// their first order binds one, and never required for superadmin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Argon2 PHC string. Only the store sees this record; every API
    /// response uses [`UserPublic`] instead.
    pub password_hash: String,
    pub role: Role,
    pub restaurant_id: Option<TenantId>,
    pub created_at: i64,
}

/// Public projection of a user (no credential material)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPublic {
    pub id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub restaurant_id: Option<TenantId>,
}

impl User {
    pub fn to_public(&self) -> UserPublic {
        UserPublic {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            role: self.role,
            restaurant_id: self.restaurant_id.clone(),
        }
    }
}
