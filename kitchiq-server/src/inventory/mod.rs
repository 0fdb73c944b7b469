//! 库存模块
//!
//! - [`expiry`] - 过期分类 (定时扫描与按需查询共用)
//! - [`scheduler`] - 每日定时扫描任务

pub mod expiry;
pub mod scheduler;

pub use scheduler::{ExpiryScheduler, ScanOutcome};
