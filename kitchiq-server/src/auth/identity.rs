//! Caller identity
//!
//! Every operation receives an explicit [`Caller`] value; nothing reads an
//! ambient "current user". An invalid or absent credential on an operation
//! that tolerates anonymity degrades to [`Caller::Guest`] built from
//! explicit request parameters only — never from a forged token.

use serde::Deserialize;
use shared::models::Role;
use shared::{AppError, AppResult, ErrorCode, TenantId};

use crate::auth::Claims;

/// 当前用户上下文 (从 JWT Claims 解析)
///
/// 由认证提取器创建，注入到请求处理函数
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// 用户 ID
    pub id: String,
    /// 邮箱
    pub email: String,
    /// 显示名称
    pub name: String,
    /// 角色
    pub role: Role,
    /// 所属餐厅
    pub restaurant_id: Option<TenantId>,
}

impl From<Claims> for CurrentUser {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            email: claims.email,
            name: claims.name,
            role: claims.role,
            restaurant_id: claims.restaurant_id,
        }
    }
}

impl CurrentUser {
    /// 是否厨房侧角色 (staff/admin)
    pub fn is_kitchen(&self) -> bool {
        self.role.is_kitchen()
    }

    /// 是否管理角色 (admin/superadmin)
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// 要求厨房侧角色，否则 403
    pub fn require_kitchen(&self) -> AppResult<()> {
        if self.is_kitchen() {
            Ok(())
        } else {
            crate::security_log!(
                "WARN",
                "role_denied",
                user_id = self.id.clone(),
                user_role = self.role.to_string(),
                required = "staff|admin"
            );
            Err(AppError::new(ErrorCode::RoleRequired))
        }
    }

    /// 要求管理角色，否则 403
    pub fn require_admin(&self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            crate::security_log!(
                "WARN",
                "admin_required",
                user_id = self.id.clone(),
                user_role = self.role.to_string()
            );
            Err(AppError::new(ErrorCode::AdminRequired))
        }
    }
}

/// 访客身份：仅来自请求参数的餐厅/桌号提示
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GuestIdentity {
    pub restaurant_id: Option<TenantId>,
    pub table_number: Option<String>,
}

/// 调用者身份 - 闭合的标签联合
///
/// 可见性与租户解析都是这个值的纯函数。
#[derive(Debug, Clone)]
pub enum Caller {
    Authenticated(CurrentUser),
    Guest(GuestIdentity),
}

impl Caller {
    /// 已认证身份绑定的餐厅 (访客的提示不算)
    pub fn bound_restaurant(&self) -> Option<&TenantId> {
        match self {
            Caller::Authenticated(user) => user.restaurant_id.as_ref(),
            Caller::Guest(_) => None,
        }
    }

    /// 请求参数携带的餐厅提示 (仅访客)
    pub fn hinted_restaurant(&self) -> Option<&TenantId> {
        match self {
            Caller::Authenticated(_) => None,
            Caller::Guest(guest) => guest.restaurant_id.as_ref(),
        }
    }

    pub fn as_authenticated(&self) -> Option<&CurrentUser> {
        match self {
            Caller::Authenticated(user) => Some(user),
            Caller::Guest(_) => None,
        }
    }

    pub fn is_kitchen(&self) -> bool {
        self.as_authenticated().is_some_and(CurrentUser::is_kitchen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staff(restaurant: Option<&str>) -> CurrentUser {
        CurrentUser {
            id: "u1".into(),
            email: "u1@example.com".into(),
            name: "U1".into(),
            role: Role::Staff,
            restaurant_id: restaurant.map(TenantId::from),
        }
    }

    #[test]
    fn test_bound_vs_hinted_restaurant() {
        let auth = Caller::Authenticated(staff(Some("R1")));
        assert_eq!(auth.bound_restaurant(), Some(&TenantId::from("R1")));
        assert_eq!(auth.hinted_restaurant(), None);

        let guest = Caller::Guest(GuestIdentity {
            restaurant_id: Some(TenantId::from("R2")),
            table_number: None,
        });
        assert_eq!(guest.bound_restaurant(), None);
        assert_eq!(guest.hinted_restaurant(), Some(&TenantId::from("R2")));
    }

    #[test]
    fn test_role_guards() {
        let user = staff(Some("R1"));
        assert!(user.require_kitchen().is_ok());
        assert_eq!(
            user.require_admin().unwrap_err().code,
            ErrorCode::AdminRequired
        );

        let customer = CurrentUser {
            role: Role::Customer,
            ..staff(None)
        };
        assert_eq!(
            customer.require_kitchen().unwrap_err().code,
            ErrorCode::RoleRequired
        );
    }

    #[test]
    fn test_guest_is_never_kitchen() {
        let guest = Caller::Guest(GuestIdentity::default());
        assert!(!guest.is_kitchen());
    }
}
