//! 数据库提供者
//!
//! 构建器产出的对象：每种方言一个实现，对外暴露策略面、命令执行面、缓存与日志

pub mod code_first;
pub mod dialect;

pub use code_first::CodeFirst;
pub use dialect::DialectProvider;

use std::fmt;
use std::marker::PhantomData;
use std::ops::Deref;
use std::sync::Arc;

use crate::ado::AdoProvider;
use crate::cache::DistributedCache;
use crate::logging::SqlLogger;
use crate::types::DatabaseType;

/// 数据库提供者能力
pub trait DatabaseProvider: Send + Sync {
    /// 方言
    fn db_type(&self) -> DatabaseType;

    /// 结构同步、参数化、延时加载等策略面
    fn code_first(&self) -> &CodeFirst;

    /// 命令执行面（主从连接与监视器）
    fn ado(&self) -> &AdoProvider;

    fn cache(&self) -> &Arc<dyn DistributedCache>;

    fn logger(&self) -> &Arc<dyn SqlLogger>;
}

/// 方言工厂的输入
#[derive(Clone, Default)]
pub struct ProviderContext {
    /// 调用方注入的缓存，`None` 时由工厂决定默认实现
    pub cache: Option<Arc<dyn DistributedCache>>,
    /// 调用方注入的日志，`None` 时由工厂决定默认实现
    pub logger: Option<Arc<dyn SqlLogger>>,
    /// 主库连接串
    pub master_connection_string: String,
    /// 从库连接串
    pub slave_connection_strings: Vec<String>,
}

impl fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext")
            .field("cache", &self.cache.is_some())
            .field("logger", &self.logger.is_some())
            .field("slave_connection_strings", &self.slave_connection_strings.len())
            .finish_non_exhaustive()
    }
}

/// 构建完成的提供者句柄
///
/// `M` 只是类型层面的标记，用来在同一进程里区分多个提供者实例，不影响行为。
/// 克隆句柄共享同一个提供者；要得到互相独立的提供者，需要再次调用 `build`。
pub struct QuickSql<M = ()> {
    inner: Arc<dyn DatabaseProvider>,
    _mark: PhantomData<fn() -> M>,
}

impl<M> QuickSql<M> {
    pub(crate) fn new(inner: Arc<dyn DatabaseProvider>) -> Self {
        Self {
            inner,
            _mark: PhantomData,
        }
    }

    /// 底层提供者
    pub fn provider(&self) -> &Arc<dyn DatabaseProvider> {
        &self.inner
    }

    /// 取出底层提供者，丢弃标记
    pub fn into_provider(self) -> Arc<dyn DatabaseProvider> {
        self.inner
    }

    /// 两个句柄是否指向同一个提供者
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<M> Clone for QuickSql<M> {
    fn clone(&self) -> Self {
        Self::new(self.inner.clone())
    }
}

impl<M> Deref for QuickSql<M> {
    type Target = dyn DatabaseProvider;

    fn deref(&self) -> &Self::Target {
        self.inner.as_ref()
    }
}

impl<M> fmt::Debug for QuickSql<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuickSql")
            .field("mark", &std::any::type_name::<M>())
            .field("db_type", &self.inner.db_type())
            .field("code_first", &self.inner.code_first().snapshot())
            .field("ado", self.inner.ado())
            .finish()
    }
}
