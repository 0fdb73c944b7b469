//! 存储层
//!
//! 嵌入式 redb 持久化：所有集合的作用域查询与写入。

pub mod storage;

pub use storage::{Store, StoreError, StoreResult};
