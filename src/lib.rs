//! rat_quicksql - 跨数据库SQL访问入口
//!
//! 通过链式构建器累积方言、主从连接串、缓存、日志、CodeFirst 策略和命令监视器，
//! 在 `build` 时一次性构造并装配好方言提供者
//!
//! ```no_run
//! use rat_quicksql::{DatabaseType, QuickSqlBuilder};
//!
//! # fn main() -> rat_quicksql::QuickSqlResult<()> {
//! let db = QuickSqlBuilder::new()
//!     .use_connection_string(DatabaseType::Sqlite, "file:document.db")
//!     .use_auto_sync_structure(true)
//!     .use_monitor_command(|cmd| println!("{}", cmd.command_text), None)
//!     .build()?
//!     .expect("内置方言总会产出提供者");
//!
//! assert!(db.code_first().is_auto_sync_structure());
//! # Ok(())
//! # }
//! ```

// 导出所有公共模块
pub mod error;
pub mod i18n;
pub mod types;
pub mod cache;
pub mod logging;
pub mod ado;
pub mod provider;
pub mod registry;
pub mod config;

// 重新导出常用类型和函数
pub use error::{QuickSqlError, QuickSqlResult};
pub use types::{CodeFirstOptions, ConnectionInfo, ConnectionStringStyle, DatabaseType};
pub use cache::{DistributedCache, MemoryCache};
pub use logging::{LogLevel, RatLoggerSink, SqlLogger};
pub use ado::{
    AdoProvider, CommandExecutedHook, CommandExecutingHook, CommandExecutor, CommandKind,
    CommandOutcome, CommandType, DbCommand, DbParameter, DetachedExecutor,
};
pub use provider::{CodeFirst, DatabaseProvider, DialectProvider, ProviderContext, QuickSql};
pub use registry::{ProviderFactory, ProviderRegistry, global_registry, register_provider};
pub use config::{QuickSqlBuilder, QuickSqlConfig};

/// 初始化rat_quicksql库
///
/// 注册多语言错误消息，可重复调用。构建器会自动调用，一般无需手动调用。
///
/// 注意：日志系统由调用者自行初始化，本库不会自动初始化日志
pub fn init() {
    i18n::ErrorMessageI18n::init();
}

/// 库版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 库名称
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// 获取库信息
pub fn get_info() -> String {
    format!("{} v{}", NAME, VERSION)
}
