//! Order Visibility Resolver
//!
//! Computes the read predicate for listing orders under one resolved
//! restaurant id. Visibility is a pure function of the caller identity;
//! handlers never branch on roles themselves.

use serde::{Deserialize, Serialize};
use shared::models::Order;
use shared::{AppError, AppResult};

use crate::auth::Caller;

/// The predicate applied by the store when listing a restaurant's orders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderFilter {
    /// Every order in the restaurant (kitchen-side callers only)
    All,
    /// Orders attributed to this customer id
    CustomerId(String),
    /// Orders attributed to this customer email
    CustomerEmail(String),
    /// Orders placed from this table
    Table(String),
}

impl OrderFilter {
    /// Whether an order (already scoped to the restaurant) is visible
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderFilter::All => true,
            OrderFilter::CustomerId(id) => order.customer_id.as_deref() == Some(id.as_str()),
            OrderFilter::CustomerEmail(email) => {
                order.customer_email.as_deref() == Some(email.as_str())
            }
            OrderFilter::Table(table) => order.table_number.as_deref() == Some(table.as_str()),
        }
    }
}

/// Resolve the `ListOrders` predicate. Priority-ordered, first match wins:
///
/// 1. kitchen-side role → all orders in the restaurant
/// 2. authenticated caller with a known email → that email's orders
/// 3. guest with an explicit table number → that table's orders
/// 4. otherwise there is no safe way to scope results → `Forbidden`
///
/// `table_hint` is the explicit table-number request parameter; for guests
/// the hint carried by the guest identity is used as fallback.
pub fn list_filter(caller: &Caller, table_hint: Option<&str>) -> AppResult<OrderFilter> {
    if let Some(user) = caller.as_authenticated() {
        if user.is_kitchen() {
            return Ok(OrderFilter::All);
        }
        if !user.email.is_empty() {
            return Ok(OrderFilter::CustomerEmail(user.email.clone()));
        }
    }

    if let Some(table) = effective_table(caller, table_hint) {
        return Ok(OrderFilter::Table(table));
    }

    Err(AppError::forbidden("Not authorized to view all orders"))
}

/// Resolve the `MyOrders` predicate.
///
/// Always attributes by caller: authenticated id, then authenticated
/// email, then the guest's table hint. Never yields [`OrderFilter::All`],
/// including for kitchen-side roles. A caller with no attribution channel
/// at all is unauthenticated for this operation.
pub fn my_orders_filter(caller: &Caller, table_hint: Option<&str>) -> AppResult<OrderFilter> {
    if let Some(user) = caller.as_authenticated() {
        if !user.id.is_empty() {
            return Ok(OrderFilter::CustomerId(user.id.clone()));
        }
        if !user.email.is_empty() {
            return Ok(OrderFilter::CustomerEmail(user.email.clone()));
        }
    }

    if let Some(table) = effective_table(caller, table_hint) {
        return Ok(OrderFilter::Table(table));
    }

    Err(AppError::unauthorized())
}

fn effective_table(caller: &Caller, table_hint: Option<&str>) -> Option<String> {
    let hinted = match caller {
        Caller::Guest(guest) => guest.table_number.as_deref(),
        Caller::Authenticated(_) => None,
    };
    table_hint
        .or(hinted)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CurrentUser, GuestIdentity};
    use shared::TenantId;
    use shared::models::{OrderStatus, OrderType, Role};

    fn user(role: Role, email: &str) -> Caller {
        Caller::Authenticated(CurrentUser {
            id: "u1".into(),
            email: email.into(),
            name: "U".into(),
            role,
            restaurant_id: Some(TenantId::from("R1")),
        })
    }

    fn guest(table: Option<&str>) -> Caller {
        Caller::Guest(GuestIdentity {
            restaurant_id: Some(TenantId::from("R1")),
            table_number: table.map(String::from),
        })
    }

    fn order(email: Option<&str>, table: Option<&str>) -> Order {
        Order {
            id: "o1".into(),
            restaurant_id: TenantId::from("R1"),
            items: vec![],
            order_type: OrderType::DineIn,
            status: OrderStatus::Pending,
            customer_id: None,
            customer_email: email.map(String::from),
            customer_name: None,
            table_number: table.map(String::from),
            delivery_address: None,
            total: None,
            created_at: 0,
        }
    }

    #[test]
    fn test_kitchen_roles_see_everything() {
        for role in [Role::Staff, Role::Admin] {
            let filter = list_filter(&user(role, "x@y.z"), None).unwrap();
            assert_eq!(filter, OrderFilter::All);
        }
    }

    #[test]
    fn test_customer_scoped_to_own_email() {
        let filter = list_filter(&user(Role::Customer, "me@example.com"), None).unwrap();
        assert_eq!(filter, OrderFilter::CustomerEmail("me@example.com".into()));

        assert!(filter.matches(&order(Some("me@example.com"), None)));
        assert!(!filter.matches(&order(Some("other@example.com"), None)));
        assert!(!filter.matches(&order(None, None)));
    }

    #[test]
    fn test_guest_scoped_to_table() {
        let filter = list_filter(&guest(Some("5")), None).unwrap();
        assert_eq!(filter, OrderFilter::Table("5".into()));

        assert!(filter.matches(&order(None, Some("5"))));
        assert!(!filter.matches(&order(None, Some("7"))));
    }

    #[test]
    fn test_explicit_table_param_wins_over_identity_hint() {
        let filter = list_filter(&guest(Some("5")), Some("9")).unwrap();
        assert_eq!(filter, OrderFilter::Table("9".into()));
    }

    #[test]
    fn test_anonymous_guest_without_table_is_forbidden() {
        let err = list_filter(&guest(None), None).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::PermissionDenied);
    }

    #[test]
    fn test_my_orders_never_returns_all_even_for_staff() {
        let filter = my_orders_filter(&user(Role::Staff, "staff@r1.example"), None).unwrap();
        assert_eq!(filter, OrderFilter::CustomerId("u1".into()));
    }

    #[test]
    fn test_my_orders_guest_uses_table_hint() {
        let filter = my_orders_filter(&guest(Some("3")), None).unwrap();
        assert_eq!(filter, OrderFilter::Table("3".into()));
    }

    #[test]
    fn test_my_orders_without_any_attribution_is_unauthenticated() {
        let err = my_orders_filter(&guest(None), None).unwrap_err();
        assert_eq!(err.code, shared::ErrorCode::NotAuthenticated);
    }
}
