//! # 提供者构建器模块
//!
//! 链式累积配置，在 `build` 时一次性完成校验、方言分发与策略注入。
//! 构建器不持有构建出的提供者，每次 `build` 都产出一个独立的实例。

use rat_logger::{debug, info};
use std::fmt;
use std::sync::Arc;

use crate::ado::{CommandExecutedHook, CommandExecutingHook, DbCommand};
use crate::cache::DistributedCache;
use crate::config::core::QuickSqlConfig;
use crate::error::QuickSqlResult;
use crate::logging::SqlLogger;
use crate::provider::{DatabaseProvider, ProviderContext, QuickSql};
use crate::registry::{ProviderRegistry, global_registry};
use crate::types::{CodeFirstOptions, DatabaseType};

/// 提供者构建器
///
/// 每个设置方法都覆盖上一次的值；从库连接串和监视器按整体替换。
#[derive(Clone, Default)]
pub struct QuickSqlBuilder {
    cache: Option<Arc<dyn DistributedCache>>,
    logger: Option<Arc<dyn SqlLogger>>,
    db_type: Option<DatabaseType>,
    master_connection_string: Option<String>,
    slave_connection_strings: Vec<String>,
    code_first: CodeFirstOptions,
    command_executing: Option<CommandExecutingHook>,
    command_executed: Option<CommandExecutedHook>,
    registry: Option<Arc<ProviderRegistry>>,
}

impl QuickSqlBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        crate::init();
        Self::default()
    }

    /// 以持久化配置初始化构建器
    pub fn from_config(config: &QuickSqlConfig) -> Self {
        let mut builder = Self::new()
            .use_connection_string(config.db_type, config.connection_string.clone())
            .use_slave(config.slave_connection_strings.iter().cloned());
        builder.code_first = config.code_first;
        builder
    }

    /// 使用缓存，不指定时由方言提供者使用内存缓存
    ///
    /// # 参数
    ///
    /// * `cache` - 缓存实现
    pub fn use_cache(mut self, cache: Option<Arc<dyn DistributedCache>>) -> Self {
        self.cache = cache;
        self
    }

    /// 使用日志，不指定时输出到 rat_logger
    ///
    /// # 参数
    ///
    /// * `logger` - 日志实现
    pub fn use_logger(mut self, logger: Option<Arc<dyn SqlLogger>>) -> Self {
        self.logger = logger;
        self
    }

    /// 使用连接串，同时设置数据库类型
    ///
    /// # 参数
    ///
    /// * `db_type` - 数据库类型
    /// * `connection_string` - 主库连接串，由方言提供者校验
    pub fn use_connection_string<S: Into<String>>(mut self, db_type: DatabaseType, connection_string: S) -> Self {
        self.db_type = Some(db_type);
        self.master_connection_string = Some(connection_string.into());
        self
    }

    /// 使用从数据库，支持多个；再次调用会整体替换
    ///
    /// # 参数
    ///
    /// * `slave_connection_strings` - 从库连接串
    pub fn use_slave<I, S>(mut self, slave_connection_strings: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slave_connection_strings = slave_connection_strings.into_iter().map(Into::into).collect();
        self
    }

    /// 自动同步实体结构到数据库，运行中检查实体表是否存在，然后创建或修改
    pub fn use_auto_sync_structure(mut self, value: bool) -> Self {
        self.code_first.auto_sync_structure = value;
        self
    }

    /// 转小写同步结构
    pub fn use_sync_structure_to_lower(mut self, value: bool) -> Self {
        self.code_first.sync_structure_to_lower = value;
        self
    }

    /// 转大写同步结构
    pub fn use_sync_structure_to_upper(mut self, value: bool) -> Self {
        self.code_first.sync_structure_to_upper = value;
        self
    }

    /// 使用数据库的主键和自增，适用 DbFirst 模式
    pub fn use_config_entity_from_db_first(mut self, value: bool) -> Self {
        self.code_first.config_entity_from_db_first = value;
        self
    }

    /// 不使用命令参数化执行，针对 Insert/Update
    pub fn use_none_command_parameter(mut self, value: bool) -> Self {
        self.code_first.none_command_parameter = value;
        self
    }

    /// 延时加载导航属性
    pub fn use_lazy_loading(mut self, value: bool) -> Self {
        self.code_first.lazy_loading = value;
        self
    }

    /// 监视数据库命令
    ///
    /// 两个监视器作为一对整体替换；`build` 时追加订阅到提供者，不会覆盖提供者已有的订阅。
    ///
    /// # 参数
    ///
    /// * `executing` - 执行前，可改写命令
    /// * `executed` - 执行后，可监视执行性能
    pub fn use_monitor_command<F>(mut self, executing: F, executed: Option<CommandExecutedHook>) -> Self
    where
        F: Fn(&mut DbCommand) + Send + Sync + 'static,
    {
        self.command_executing = Some(Arc::new(executing));
        self.command_executed = executed;
        self
    }

    /// 使用指定的方言注册表，不指定时使用全局注册表
    pub fn use_registry(mut self, registry: Arc<ProviderRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn db_type(&self) -> Option<DatabaseType> {
        self.db_type
    }

    pub fn master_connection_string(&self) -> Option<&str> {
        self.master_connection_string.as_deref()
    }

    pub fn slave_connection_strings(&self) -> &[String] {
        &self.slave_connection_strings
    }

    pub fn code_first_options(&self) -> CodeFirstOptions {
        self.code_first
    }

    pub fn has_cache(&self) -> bool {
        self.cache.is_some()
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    pub fn has_monitor_command(&self) -> bool {
        self.command_executing.is_some() || self.command_executed.is_some()
    }

    /// 构建提供者
    ///
    /// 见 [`build_with_mark`](Self::build_with_mark)
    pub fn build(&self) -> QuickSqlResult<Option<QuickSql>> {
        self.build_with_mark::<()>()
    }

    /// 构建带类型标记的提供者
    ///
    /// 标记类型只用于在同一进程中区分多个提供者实例。
    ///
    /// # 错误
    ///
    /// * 未调用 `use_connection_string` 时返回 [`QuickSqlError::ConfigError`](crate::QuickSqlError::ConfigError)，不构造任何对象
    /// * 注册表中没有该方言时返回 [`QuickSqlError::UnsupportedDatabase`](crate::QuickSqlError::UnsupportedDatabase)
    /// * 方言工厂自身的错误原样返回
    ///
    /// 工厂返回 `None` 时跳过策略注入并返回 `Ok(None)`
    pub fn build_with_mark<M>(&self) -> QuickSqlResult<Option<QuickSql<M>>> {
        crate::init();

        let db_type = self
            .db_type
            .ok_or_else(|| crate::quick_error!(config, crate::i18n::t("error.no_connection")))?;

        let registry = self.registry.clone().unwrap_or_else(global_registry);
        let factory = registry.resolve(db_type)?;

        let context = ProviderContext {
            cache: self.cache.clone(),
            logger: self.logger.clone(),
            master_connection_string: self.master_connection_string.clone().unwrap_or_default(),
            slave_connection_strings: self.slave_connection_strings.clone(),
        };

        let Some(provider) = factory(context)? else {
            debug!("{}方言工厂未返回提供者，跳过策略注入", db_type);
            return Ok(None);
        };

        self.inject(provider.as_ref());

        info!(
            "构建{}提供者完成: 主库={}, 从库数量={}, 策略={:?}",
            db_type,
            provider.ado().master().masked(),
            provider.ado().slaves().len(),
            self.code_first
        );

        Ok(Some(QuickSql::new(provider)))
    }

    /// 把策略开关和监视器装配到新构造的提供者上
    fn inject(&self, provider: &dyn DatabaseProvider) {
        provider.code_first().apply(&self.code_first);
        if self.code_first.has_case_conflict() {
            provider
                .logger()
                .warn("同时开启了转小写与转大写同步结构，由结构同步引擎决定优先级");
        }

        let ado = provider.ado();
        if let Some(hook) = &self.command_executing {
            ado.subscribe_executing(hook.clone());
        }
        if let Some(hook) = &self.command_executed {
            ado.subscribe_executed(hook.clone());
        }
    }
}

impl fmt::Debug for QuickSqlBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickSqlBuilder")
            .field("db_type", &self.db_type)
            .field("slave_connection_strings", &self.slave_connection_strings.len())
            .field("code_first", &self.code_first)
            .field("cache", &self.cache.is_some())
            .field("logger", &self.logger.is_some())
            .field("monitor_command", &self.has_monitor_command())
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::QuickSqlError;
    use crate::logging::LogLevel;

    #[test]
    fn test_build_without_connection_fails() {
        let builder = QuickSqlBuilder::new()
            .use_auto_sync_structure(true)
            .use_lazy_loading(true)
            .use_slave(["Server=replica"]);
        assert!(matches!(builder.build(), Err(QuickSqlError::ConfigError { .. })));
    }

    #[test]
    fn test_last_write_wins() {
        let builder = QuickSqlBuilder::new()
            .use_connection_string(DatabaseType::MySql, "Server=a")
            .use_connection_string(DatabaseType::Sqlite, "file:b.db")
            .use_lazy_loading(true)
            .use_lazy_loading(false)
            .use_slave(["file:r1.db"])
            .use_slave(["file:r2.db", "file:r3.db"]);

        assert_eq!(builder.db_type(), Some(DatabaseType::Sqlite));
        assert_eq!(builder.master_connection_string(), Some("file:b.db"));
        assert_eq!(builder.slave_connection_strings(), ["file:r2.db", "file:r3.db"]);
        assert!(!builder.code_first_options().lazy_loading);
    }

    #[derive(Default)]
    struct CollectingLogger {
        lines: parking_lot::Mutex<Vec<(LogLevel, String)>>,
    }

    impl SqlLogger for CollectingLogger {
        fn log(&self, level: LogLevel, message: &str) {
            self.lines.lock().push((level, message.to_string()));
        }
    }

    #[test]
    fn test_lower_and_upper_sync_both_kept_with_warning() {
        let logger = Arc::new(CollectingLogger::default());
        let sink: Arc<dyn SqlLogger> = logger.clone();

        let db = QuickSqlBuilder::new()
            .use_connection_string(DatabaseType::Oracle, "user id=u;data source=//db:1521/XE")
            .use_logger(Some(sink))
            .use_sync_structure_to_lower(true)
            .use_sync_structure_to_upper(true)
            .build()
            .unwrap()
            .unwrap();

        assert!(db.code_first().is_sync_structure_to_lower());
        assert!(db.code_first().is_sync_structure_to_upper());

        let lines = logger.lines.lock();
        let warnings: Vec<_> = lines.iter().filter(|(level, _)| *level == LogLevel::Warn).collect();
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_single_case_sync_logs_nothing() {
        let logger = Arc::new(CollectingLogger::default());
        let sink: Arc<dyn SqlLogger> = logger.clone();

        QuickSqlBuilder::new()
            .use_connection_string(DatabaseType::Sqlite, ":memory:")
            .use_logger(Some(sink))
            .use_sync_structure_to_upper(true)
            .build()
            .unwrap()
            .unwrap();

        assert!(logger.lines.lock().is_empty());
    }

    #[test]
    fn test_from_config_seeds_every_field() {
        let mut config = QuickSqlConfig::new(DatabaseType::PostgreSql, "Host=db;Database=app");
        config.slave_connection_strings = vec!["Host=replica".to_string()];
        config.code_first.none_command_parameter = true;

        let builder = config.builder();
        assert_eq!(builder.db_type(), Some(DatabaseType::PostgreSql));
        assert_eq!(builder.slave_connection_strings().len(), 1);
        assert!(builder.code_first_options().none_command_parameter);
        assert!(!builder.has_cache() && !builder.has_logger() && !builder.has_monitor_command());
    }
}
