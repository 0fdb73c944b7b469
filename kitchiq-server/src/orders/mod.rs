//! 订单引擎
//!
//! - [`visibility`] - 按调用者身份解析订单可见性谓词
//! - [`lifecycle`] - 创建校验与前向状态机

pub mod lifecycle;
pub mod visibility;

pub use visibility::OrderFilter;
