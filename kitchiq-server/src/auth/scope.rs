//! Tenant Scope Guard
//!
//! Resolves exactly one effective restaurant id for a request. Every data
//! operation must use an id produced here; a staff member of restaurant A
//! can never read or mutate restaurant B's data by guessing B's id in a
//! parameter, because the authenticated binding always wins.

use shared::{AppError, AppResult, TenantId};

use crate::auth::Caller;

/// Resolve the effective restaurant id for an operation.
///
/// Precedence: the authenticated identity's bound restaurant, then the
/// explicit request parameter (a guest's query hint counts as explicit).
/// Both absent → `TenantNotSelected`.
pub fn resolve_tenant(caller: &Caller, explicit: Option<&TenantId>) -> AppResult<TenantId> {
    if let Some(bound) = caller.bound_restaurant() {
        return Ok(bound.clone());
    }
    if let Some(param) = explicit.or_else(|| caller.hinted_restaurant()) {
        return Ok(param.clone());
    }
    Err(AppError::missing_tenant())
}
