//! 认证模块
//!
//! JWT 认证、调用者身份与租户作用域。
//!
//! # 组件
//!
//! - [`JwtService`] - 令牌生成与验证
//! - [`CurrentUser`] / [`Caller`] - 调用者身份 (必选/可选提取器)
//! - [`resolve_tenant`] - 租户作用域守卫

pub mod extractor;
pub mod identity;
pub mod jwt;
pub mod scope;

pub use identity::{Caller, CurrentUser, GuestIdentity};
pub use jwt::{Claims, JwtConfig, JwtError, JwtService};
pub use scope::resolve_tenant;
