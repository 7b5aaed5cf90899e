//! # 配置构建器模块
//!
//! 提供提供者构建器的实现，支持链式调用和构建时校验

pub mod quick_sql_builder;

pub use quick_sql_builder::QuickSqlBuilder;
