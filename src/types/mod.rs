//! 数据库类型定义和配置
//!
//! 定义支持的数据库方言、连接串解析结果以及策略开关

pub mod database_config;
pub mod code_first;

// 重新导出所有公共类型
pub use database_config::{DatabaseType, ConnectionInfo, ConnectionStringStyle};
pub use code_first::CodeFirstOptions;
