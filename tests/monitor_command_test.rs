//! 命令监视器集成测试

use async_trait::async_trait;
use parking_lot::Mutex;
use rat_quicksql::{
    CommandExecutedHook, CommandExecutor, CommandOutcome, ConnectionInfo, DatabaseType, DbCommand,
    LogLevel, QuickSqlBuilder, QuickSqlError, QuickSqlResult, SqlLogger,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use uuid::Uuid;

/// 记录执行过的命令文本
#[derive(Default)]
struct RecordingExecutor {
    executed: Mutex<Vec<String>>,
}

#[async_trait]
impl CommandExecutor for RecordingExecutor {
    async fn execute(&self, _connection: &ConnectionInfo, command: &DbCommand) -> QuickSqlResult<CommandOutcome> {
        self.executed.lock().push(command.command_text.clone());
        if command.command_text.starts_with("BROKEN") {
            return Err(QuickSqlError::CommandError {
                message: "syntax error".to_string(),
            });
        }
        Ok(CommandOutcome::affected(1))
    }
}

#[derive(Default)]
struct CollectingLogger {
    lines: Mutex<Vec<String>>,
}

impl SqlLogger for CollectingLogger {
    fn log(&self, _level: LogLevel, message: &str) {
        self.lines.lock().push(message.to_string());
    }
}

#[tokio::test]
async fn test_hooks_fire_once_per_command() {
    let before_ids = Arc::new(Mutex::new(Vec::<Uuid>::new()));
    let after_ids = Arc::new(Mutex::new(Vec::<Uuid>::new()));

    let executed: CommandExecutedHook = {
        let after_ids = after_ids.clone();
        Arc::new(move |cmd: &DbCommand, _log: &str| after_ids.lock().push(cmd.id()))
    };

    let db = {
        let before_ids = before_ids.clone();
        QuickSqlBuilder::new()
            .use_connection_string(DatabaseType::Sqlite, "file:monitor.db")
            .use_monitor_command(move |cmd: &mut DbCommand| before_ids.lock().push(cmd.id()), Some(executed))
            .build()
            .unwrap()
            .unwrap()
    };
    db.ado().attach_executor(Arc::new(RecordingExecutor::default()));

    for i in 0..5 {
        db.ado()
            .execute_non_query(format!("INSERT INTO t VALUES ({})", i))
            .await
            .unwrap();
    }

    let before_ids = before_ids.lock();
    let after_ids = after_ids.lock();
    assert_eq!(before_ids.len(), 5);
    assert_eq!(*before_ids, *after_ids);
}

#[tokio::test]
async fn test_executing_hook_rewrites_command_before_driver() {
    let executor = Arc::new(RecordingExecutor::default());
    let db = QuickSqlBuilder::new()
        .use_connection_string(DatabaseType::PostgreSql, "Host=db;Database=app")
        .use_monitor_command(
            |cmd: &mut DbCommand| cmd.command_text = format!("/* traced */ {}", cmd.command_text),
            None,
        )
        .build()
        .unwrap()
        .unwrap();
    db.ado().attach_executor(executor.clone());

    db.ado().query("SELECT 1").await.unwrap();
    assert_eq!(*executor.executed.lock(), vec!["/* traced */ SELECT 1".to_string()]);
}

#[tokio::test]
async fn test_executed_hook_sees_failures() {
    let logs = Arc::new(Mutex::new(Vec::<String>::new()));
    let executed: CommandExecutedHook = {
        let logs = logs.clone();
        Arc::new(move |_cmd: &DbCommand, log: &str| logs.lock().push(log.to_string()))
    };

    let logger = Arc::new(CollectingLogger::default());
    let sink: Arc<dyn SqlLogger> = logger.clone();
    let db = QuickSqlBuilder::new()
        .use_connection_string(DatabaseType::MySql, "Server=master;Database=app")
        .use_logger(Some(sink))
        .use_monitor_command(|_cmd: &mut DbCommand| {}, Some(executed))
        .build()
        .unwrap()
        .unwrap();
    db.ado().attach_executor(Arc::new(RecordingExecutor::default()));

    let result = db.ado().execute_non_query("BROKEN STATEMENT").await;
    assert!(matches!(result, Err(QuickSqlError::CommandError { .. })));

    let logs = logs.lock();
    assert_eq!(logs.len(), 1);
    assert!(logs[0].starts_with("BROKEN STATEMENT\r\n-- mysql "));
    assert!(logs[0].ends_with("error: syntax error"));
    assert_eq!(*logger.lines.lock(), *logs);
}

#[tokio::test]
async fn test_without_driver_hooks_still_fire() {
    let after = Arc::new(AtomicUsize::new(0));
    let executed: CommandExecutedHook = {
        let after = after.clone();
        Arc::new(move |_cmd: &DbCommand, _log: &str| {
            after.fetch_add(1, Ordering::SeqCst);
        })
    };

    let db = QuickSqlBuilder::new()
        .use_connection_string(DatabaseType::Oracle, "user id=u;password=p;data source=//127.0.0.1:1521/XE")
        .use_monitor_command(|_cmd: &mut DbCommand| {}, Some(executed))
        .build()
        .unwrap()
        .unwrap();

    let result = db.ado().execute_non_query("DELETE FROM t").await;
    assert!(matches!(result, Err(QuickSqlError::ConnectionError { .. })));
    assert_eq!(after.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_concurrent_commands_are_all_observed() {
    let before = Arc::new(AtomicUsize::new(0));
    let after_ids = Arc::new(Mutex::new(Vec::<Uuid>::new()));

    let executed: CommandExecutedHook = {
        let after_ids = after_ids.clone();
        Arc::new(move |cmd: &DbCommand, _log: &str| after_ids.lock().push(cmd.id()))
    };

    let db = {
        let before = before.clone();
        QuickSqlBuilder::new()
            .use_connection_string(DatabaseType::SqlServer, "Server=.;Initial Catalog=app")
            .use_slave(["Server=replica1", "Server=replica2"])
            .use_monitor_command(
                move |_cmd: &mut DbCommand| {
                    before.fetch_add(1, Ordering::SeqCst);
                },
                Some(executed),
            )
            .build()
            .unwrap()
            .unwrap()
    };
    db.ado().attach_executor(Arc::new(RecordingExecutor::default()));

    let mut handles = Vec::new();
    for task in 0..8 {
        let db = db.clone();
        handles.push(tokio::spawn(async move {
            let mut ids = Vec::new();
            for i in 0..10 {
                let command = DbCommand::query(format!("SELECT {} FROM t{}", i, task));
                ids.push(command.id());
                db.ado().execute(command).await.unwrap();
            }
            ids
        }));
    }

    let mut expected = Vec::new();
    for handle in handles {
        expected.extend(handle.await.unwrap());
    }

    assert_eq!(before.load(Ordering::SeqCst), 80);
    let mut observed = after_ids.lock().clone();
    observed.sort();
    expected.sort();
    assert_eq!(observed, expected);
}
