//! 命令执行提供者
//!
//! 维护主从连接、当前驱动以及执行前/执行后两组监视器订阅列表。
//! 订阅是追加式的，触发时先在读锁下复制一份快照再逐个同步调用，
//! 因此监视器内部再订阅不会死锁。

use parking_lot::RwLock;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use super::command::{CommandKind, DbCommand};
use super::executor::{CommandExecutor, CommandOutcome, DetachedExecutor};
use super::{CommandExecutedHook, CommandExecutingHook};
use crate::error::QuickSqlResult;
use crate::logging::{LogLevel, SqlLogger};
use crate::types::{ConnectionInfo, DatabaseType};

/// 命令执行提供者
pub struct AdoProvider {
    db_type: DatabaseType,
    master: ConnectionInfo,
    slaves: Vec<ConnectionInfo>,
    slave_cursor: AtomicUsize,
    executor: RwLock<Arc<dyn CommandExecutor>>,
    executing_hooks: RwLock<Vec<CommandExecutingHook>>,
    executed_hooks: RwLock<Vec<CommandExecutedHook>>,
    logger: Arc<dyn SqlLogger>,
}

impl AdoProvider {
    /// 创建执行提供者，初始挂载 [`DetachedExecutor`]
    pub fn new(
        db_type: DatabaseType,
        master: ConnectionInfo,
        slaves: Vec<ConnectionInfo>,
        logger: Arc<dyn SqlLogger>,
    ) -> Self {
        Self {
            db_type,
            master,
            slaves,
            slave_cursor: AtomicUsize::new(0),
            executor: RwLock::new(Arc::new(DetachedExecutor::new(db_type))),
            executing_hooks: RwLock::new(Vec::new()),
            executed_hooks: RwLock::new(Vec::new()),
            logger,
        }
    }

    pub fn db_type(&self) -> DatabaseType {
        self.db_type
    }

    /// 主库连接
    pub fn master(&self) -> &ConnectionInfo {
        &self.master
    }

    /// 从库连接，按配置顺序
    pub fn slaves(&self) -> &[ConnectionInfo] {
        &self.slaves
    }

    /// 挂载驱动，替换当前执行器
    pub fn attach_executor(&self, executor: Arc<dyn CommandExecutor>) {
        *self.executor.write() = executor;
    }

    /// 追加执行前监视器
    pub fn subscribe_executing(&self, hook: CommandExecutingHook) {
        self.executing_hooks.write().push(hook);
    }

    /// 追加执行后监视器
    pub fn subscribe_executed(&self, hook: CommandExecutedHook) {
        self.executed_hooks.write().push(hook);
    }

    pub fn executing_subscriber_count(&self) -> usize {
        self.executing_hooks.read().len()
    }

    pub fn executed_subscriber_count(&self) -> usize {
        self.executed_hooks.read().len()
    }

    /// 选择执行连接：有从库的查询按轮询走从库，其余走主库
    pub fn select_connection(&self, kind: CommandKind) -> &ConnectionInfo {
        match kind {
            CommandKind::Query if !self.slaves.is_empty() => {
                let index = self.slave_cursor.fetch_add(1, Ordering::Relaxed) % self.slaves.len();
                &self.slaves[index]
            }
            _ => &self.master,
        }
    }

    /// 执行命令
    ///
    /// 依次触发执行前监视器、调用驱动、输出日志、触发执行后监视器。
    /// 执行失败时执行后监视器同样会被触发，驱动的结果原样返回。
    /// 监视器内部的 panic 不做捕获。
    pub async fn execute(&self, mut command: DbCommand) -> QuickSqlResult<CommandOutcome> {
        let executing = self.executing_hooks.read().clone();
        for hook in &executing {
            hook(&mut command);
        }

        let connection = self.select_connection(command.kind());
        let executor = self.executor.read().clone();

        let started = Instant::now();
        let result = executor.execute(connection, &command).await;
        let elapsed = started.elapsed();

        let log_text = self.render_log(&command, elapsed, &result);
        if self.logger.is_enabled(LogLevel::Debug) {
            self.logger.debug(&log_text);
        }

        let executed = self.executed_hooks.read().clone();
        for hook in &executed {
            hook(&command, &log_text);
        }

        result
    }

    /// 执行写命令，返回受影响行数
    pub async fn execute_non_query<S: Into<String>>(&self, sql: S) -> QuickSqlResult<u64> {
        self.execute(DbCommand::non_query(sql))
            .await
            .map(|outcome| outcome.rows_affected)
    }

    /// 执行查询，返回结果行
    pub async fn query<S: Into<String>>(&self, sql: S) -> QuickSqlResult<Vec<serde_json::Value>> {
        self.execute(DbCommand::query(sql))
            .await
            .map(|outcome| outcome.rows)
    }

    fn render_log(&self, command: &DbCommand, elapsed: Duration, result: &QuickSqlResult<CommandOutcome>) -> String {
        let status = match result {
            Ok(_) => "ok".to_string(),
            Err(e) => format!("error: {}", e),
        };
        format!(
            "{}\r\n-- {} {}ms {}",
            command.command_text,
            self.db_type,
            elapsed.as_millis(),
            status
        )
    }
}

impl fmt::Debug for AdoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdoProvider")
            .field("db_type", &self.db_type)
            .field("master", &self.master.masked())
            .field("slaves", &self.slaves.len())
            .field("executing_hooks", &self.executing_subscriber_count())
            .field("executed_hooks", &self.executed_subscriber_count())
            .finish()
    }
}
