//! 命令执行面
//!
//! 包含命令对象、驱动接口以及带监视器订阅列表的 [`AdoProvider`]

pub mod command;
pub mod executor;
pub mod provider;

pub use command::{CommandKind, CommandType, DbCommand, DbParameter};
pub use executor::{CommandExecutor, CommandOutcome, DetachedExecutor};
pub use provider::AdoProvider;

use std::sync::Arc;

/// 命令执行前监视器，可改写命令
pub type CommandExecutingHook = Arc<dyn Fn(&mut DbCommand) + Send + Sync>;

/// 命令执行后监视器，第二个参数为带耗时的日志文本
pub type CommandExecutedHook = Arc<dyn Fn(&DbCommand, &str) + Send + Sync>;
