//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证与用户管理接口
//! - [`orders`] - 订单接口
//! - [`menu`] - 菜单管理接口
//! - [`inventory`] - 库存管理接口
//! - [`restaurants`] - 餐厅管理接口

pub mod auth;
pub mod health;
pub mod inventory;
pub mod menu;
pub mod orders;
pub mod restaurants;

// Re-export common types for handlers
pub use crate::utils::{ApiResponse, AppResult};
