//! 驱动接口
//!
//! 真正与数据库通信的部分由驱动实现 [`CommandExecutor`] 后挂到提供者上

use async_trait::async_trait;

use super::command::DbCommand;
use crate::error::QuickSqlResult;
use crate::types::{ConnectionInfo, DatabaseType};

/// 命令执行结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandOutcome {
    /// 受影响行数
    pub rows_affected: u64,
    /// 查询返回的行，每行一个 JSON 对象
    pub rows: Vec<serde_json::Value>,
}

impl CommandOutcome {
    pub fn affected(rows_affected: u64) -> Self {
        Self {
            rows_affected,
            rows: Vec::new(),
        }
    }

    pub fn rows(rows: Vec<serde_json::Value>) -> Self {
        Self {
            rows_affected: 0,
            rows,
        }
    }
}

/// 命令执行器（驱动）
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// 在指定连接上执行命令
    async fn execute(&self, connection: &ConnectionInfo, command: &DbCommand) -> QuickSqlResult<CommandOutcome>;
}

/// 未绑定驱动时的占位执行器，所有命令都返回连接错误
#[derive(Debug, Clone, Copy)]
pub struct DetachedExecutor {
    db_type: DatabaseType,
}

impl DetachedExecutor {
    pub fn new(db_type: DatabaseType) -> Self {
        Self { db_type }
    }
}

#[async_trait]
impl CommandExecutor for DetachedExecutor {
    async fn execute(&self, _connection: &ConnectionInfo, _command: &DbCommand) -> QuickSqlResult<CommandOutcome> {
        Err(crate::error::QuickSqlError::ConnectionError {
            message: crate::i18n::tf("error.driver_not_attached", &[("db_type", self.db_type.as_str())]),
        })
    }
}
