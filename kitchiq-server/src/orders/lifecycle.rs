//! Order Lifecycle Manager
//!
//! Validates order creation and applies staff-side updates. Creation
//! accepts an explicit initial status as-is; updates run through the
//! forward-only status machine.

use shared::models::{Order, OrderCreate, OrderType, OrderUpdate};
use shared::util::{now_millis, record_id};
use shared::{AppError, AppResult, ErrorCode, TenantId};

use crate::auth::Caller;

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(|s| s.trim()).filter(|s| !s.is_empty())
}

/// Validate a create payload and build the durable [`Order`] record.
///
/// Requires the resolved restaurant id and at least one attribution
/// channel: an authenticated id/email, a guest name + table, or a
/// delivery address on delivery-type orders. Order-type field rules:
/// dine-in needs a table number, delivery needs an address.
pub fn build_order(req: OrderCreate, caller: &Caller, tenant: TenantId) -> AppResult<Order> {
    if req.items.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if let Some(line) = req.items.iter().find(|line| line.quantity == 0) {
        return Err(
            AppError::validation("Line item quantity must be at least 1")
                .with_detail("menu_item", line.menu_item.clone()),
        );
    }

    let table_number = non_empty(req.table_number.as_ref()).map(String::from);
    let delivery_address = non_empty(req.delivery_address.as_ref()).map(String::from);
    let customer_name = non_empty(req.customer_name.as_ref()).map(String::from);

    match req.order_type {
        OrderType::DineIn if table_number.is_none() => {
            return Err(AppError::new(ErrorCode::TableNumberRequired));
        }
        OrderType::Delivery if delivery_address.is_none() => {
            return Err(AppError::new(ErrorCode::DeliveryAddressRequired));
        }
        _ => {}
    }

    let authenticated = caller.as_authenticated();
    let customer_id = authenticated.map(|u| u.id.clone());
    let customer_email = authenticated
        .map(|u| u.email.clone())
        .filter(|e| !e.is_empty());

    // At least one channel must let someone retrieve this order later
    let guest_attribution = customer_name.is_some() && table_number.is_some();
    let delivery_attribution =
        req.order_type == OrderType::Delivery && delivery_address.is_some();
    if customer_id.is_none()
        && customer_email.is_none()
        && !guest_attribution
        && !delivery_attribution
    {
        return Err(AppError::new(ErrorCode::AttributionRequired));
    }

    Ok(Order {
        id: record_id(),
        restaurant_id: tenant,
        items: req.items,
        order_type: req.order_type,
        // Explicit initial status is accepted as-is
        status: req.status.unwrap_or_default(),
        customer_id,
        customer_email,
        customer_name,
        table_number,
        delivery_address,
        total: req.total,
        created_at: now_millis(),
    })
}

/// Apply a staff-side update to an order in place.
///
/// A status change must move forward through the machine; everything
/// else on the patch overwrites the matching field. The restaurant id
/// is untouchable.
pub fn apply_update(order: &mut Order, patch: OrderUpdate) -> AppResult<()> {
    if let Some(next) = patch.status
        && next != order.status
    {
        if !order.status.can_transition_to(next) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot move order from {} to {}", order.status, next),
            ));
        }
        order.status = next;
    }

    if let Some(items) = patch.items {
        if items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        order.items = items;
    }
    if let Some(name) = patch.customer_name {
        order.customer_name = Some(name);
    }
    if let Some(table) = patch.table_number {
        order.table_number = Some(table);
    }
    if let Some(address) = patch.delivery_address {
        order.delivery_address = Some(address);
    }
    if let Some(total) = patch.total {
        order.total = Some(total);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{CurrentUser, GuestIdentity};
    use shared::models::{OrderLine, OrderStatus, Role};

    fn guest_caller() -> Caller {
        Caller::Guest(GuestIdentity::default())
    }

    fn customer_caller() -> Caller {
        Caller::Authenticated(CurrentUser {
            id: "u9".into(),
            email: "diner@example.com".into(),
            name: "Diner".into(),
            role: Role::Customer,
            restaurant_id: None,
        })
    }

    fn lines() -> Vec<OrderLine> {
        vec![OrderLine {
            menu_item: "M1".into(),
            quantity: 2,
        }]
    }

    fn dine_in(table: Option<&str>, name: Option<&str>) -> OrderCreate {
        OrderCreate {
            items: lines(),
            order_type: OrderType::DineIn,
            status: None,
            customer_name: name.map(String::from),
            table_number: table.map(String::from),
            delivery_address: None,
            total: None,
            restaurant_id: None,
        }
    }

    #[test]
    fn test_guest_dine_in_order() {
        let order = build_order(
            dine_in(Some("5"), Some("Ana")),
            &guest_caller(),
            TenantId::from("R1"),
        )
        .unwrap();

        assert_eq!(order.restaurant_id, TenantId::from("R1"));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.table_number.as_deref(), Some("5"));
        assert!(order.customer_id.is_none());
    }

    #[test]
    fn test_dine_in_without_table_is_rejected() {
        let err = build_order(dine_in(None, Some("Ana")), &guest_caller(), "R1".into())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TableNumberRequired);
    }

    #[test]
    fn test_delivery_without_address_is_rejected() {
        let req = OrderCreate {
            order_type: OrderType::Delivery,
            delivery_address: Some("  ".into()),
            ..dine_in(None, Some("Ana"))
        };
        let err = build_order(req, &customer_caller(), "R1".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::DeliveryAddressRequired);
    }

    #[test]
    fn test_delivery_address_is_sufficient_attribution() {
        let req = OrderCreate {
            order_type: OrderType::Delivery,
            delivery_address: Some("1 Main St".into()),
            customer_name: None,
            ..dine_in(None, None)
        };
        let order = build_order(req, &guest_caller(), "R1".into()).unwrap();
        assert_eq!(order.delivery_address.as_deref(), Some("1 Main St"));
    }

    #[test]
    fn test_guest_takeaway_without_attribution_is_rejected() {
        let req = OrderCreate {
            order_type: OrderType::Takeaway,
            ..dine_in(None, None)
        };
        let err = build_order(req, &guest_caller(), "R1".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::AttributionRequired);
    }

    #[test]
    fn test_authenticated_identity_is_attribution() {
        let req = OrderCreate {
            order_type: OrderType::Takeaway,
            ..dine_in(None, None)
        };
        let order = build_order(req, &customer_caller(), "R1".into()).unwrap();
        assert_eq!(order.customer_id.as_deref(), Some("u9"));
        assert_eq!(order.customer_email.as_deref(), Some("diner@example.com"));
    }

    #[test]
    fn test_empty_items_rejected() {
        let req = OrderCreate {
            items: vec![],
            ..dine_in(Some("5"), Some("Ana"))
        };
        let err = build_order(req, &guest_caller(), "R1".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let req = OrderCreate {
            items: vec![OrderLine {
                menu_item: "M1".into(),
                quantity: 0,
            }],
            ..dine_in(Some("5"), Some("Ana"))
        };
        let err = build_order(req, &guest_caller(), "R1".into()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn test_explicit_initial_status_accepted_as_is() {
        let req = OrderCreate {
            status: Some(OrderStatus::Preparing),
            ..dine_in(Some("5"), Some("Ana"))
        };
        let order = build_order(req, &guest_caller(), "R1".into()).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
    }

    #[test]
    fn test_update_walks_the_machine() {
        let mut order = build_order(
            dine_in(Some("5"), Some("Ana")),
            &guest_caller(),
            "R1".into(),
        )
        .unwrap();

        for status in [
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Completed,
        ] {
            apply_update(
                &mut order,
                OrderUpdate {
                    status: Some(status),
                    ..Default::default()
                },
            )
            .unwrap();
            assert_eq!(order.status, status);
        }
    }

    #[test]
    fn test_update_allows_forward_jump() {
        let mut order = build_order(
            dine_in(Some("5"), Some("Ana")),
            &guest_caller(),
            "R1".into(),
        )
        .unwrap();

        apply_update(
            &mut order,
            OrderUpdate {
                status: Some(OrderStatus::Ready),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Ready);
    }

    #[test]
    fn test_update_rejects_regressions() {
        let mut order = build_order(
            dine_in(Some("5"), Some("Ana")),
            &guest_caller(),
            "R1".into(),
        )
        .unwrap();

        order.status = OrderStatus::Ready;
        let err = apply_update(
            &mut order,
            OrderUpdate {
                status: Some(OrderStatus::Pending),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        assert_eq!(order.status, OrderStatus::Ready);

        order.status = OrderStatus::Completed;
        let err = apply_update(
            &mut order,
            OrderUpdate {
                status: Some(OrderStatus::Preparing),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    }

    #[test]
    fn test_same_status_update_is_a_noop() {
        let mut order = build_order(
            dine_in(Some("5"), Some("Ana")),
            &guest_caller(),
            "R1".into(),
        )
        .unwrap();

        apply_update(
            &mut order,
            OrderUpdate {
                status: Some(OrderStatus::Pending),
                table_number: Some("7".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.table_number.as_deref(), Some("7"));
    }
}
