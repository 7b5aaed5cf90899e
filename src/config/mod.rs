//! # 配置管理模块
//!
//! 提供链式构建器与可持久化配置，构建器是整个库的入口

pub mod builders;
pub mod core;

pub use builders::QuickSqlBuilder;
pub use self::core::QuickSqlConfig;
