//! 方言注册表
//!
//! 方言到工厂函数的分发表。进程级实例首次使用时注册五种内置方言，
//! 之后可以通过 [`register_provider`] 追加或替换方言，无需修改分发代码。

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;
use rat_logger::info;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::QuickSqlResult;
use crate::provider::{DatabaseProvider, DialectProvider, ProviderContext};
use crate::types::DatabaseType;

/// 方言工厂
///
/// 返回 `Ok(None)` 表示工厂合法地没有产出提供者，构建器会原样返回 `None`。
pub type ProviderFactory =
    Arc<dyn Fn(ProviderContext) -> QuickSqlResult<Option<Arc<dyn DatabaseProvider>>> + Send + Sync>;

/// 全局方言注册表
static GLOBAL_PROVIDER_REGISTRY: Lazy<ArcSwap<ProviderRegistry>> =
    Lazy::new(|| ArcSwap::from_pointee(ProviderRegistry::with_builtin_dialects()));

/// 方言注册表
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    factories: HashMap<DatabaseType, ProviderFactory>,
}

impl ProviderRegistry {
    /// 空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册了全部内置方言的注册表
    pub fn with_builtin_dialects() -> Self {
        let mut registry = Self::new();
        for db_type in DatabaseType::ALL {
            registry.register_factory(db_type, builtin_factory(db_type));
        }
        registry
    }

    /// 注册工厂闭包，返回被替换的旧工厂
    pub fn register<F>(&mut self, db_type: DatabaseType, factory: F) -> Option<ProviderFactory>
    where
        F: Fn(ProviderContext) -> QuickSqlResult<Option<Arc<dyn DatabaseProvider>>> + Send + Sync + 'static,
    {
        self.register_factory(db_type, Arc::new(factory))
    }

    /// 注册已包装好的工厂，返回被替换的旧工厂
    pub fn register_factory(&mut self, db_type: DatabaseType, factory: ProviderFactory) -> Option<ProviderFactory> {
        self.factories.insert(db_type, factory)
    }

    /// 移除方言
    pub fn unregister(&mut self, db_type: DatabaseType) -> Option<ProviderFactory> {
        self.factories.remove(&db_type)
    }

    /// 查找方言工厂
    ///
    /// # 错误
    ///
    /// 方言未注册时返回 [`QuickSqlError::UnsupportedDatabase`](crate::QuickSqlError::UnsupportedDatabase)
    pub fn resolve(&self, db_type: DatabaseType) -> QuickSqlResult<ProviderFactory> {
        self.factories
            .get(&db_type)
            .cloned()
            .ok_or_else(|| crate::quick_error!(unsupported_db, db_type))
    }

    pub fn contains(&self, db_type: DatabaseType) -> bool {
        self.factories.contains_key(&db_type)
    }

    /// 已注册方言，按枚举顺序排列
    pub fn dialects(&self) -> Vec<DatabaseType> {
        let mut dialects: Vec<DatabaseType> = self.factories.keys().copied().collect();
        dialects.sort();
        dialects
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("dialects", &self.dialects())
            .finish()
    }
}

/// 内置方言的工厂
pub fn builtin_factory(db_type: DatabaseType) -> ProviderFactory {
    Arc::new(move |context: ProviderContext| -> QuickSqlResult<Option<Arc<dyn DatabaseProvider>>> {
        let provider = DialectProvider::new(db_type, context)?;
        Ok(Some(Arc::new(provider) as Arc<dyn DatabaseProvider>))
    })
}

/// 获取全局注册表的当前快照
pub fn global_registry() -> Arc<ProviderRegistry> {
    GLOBAL_PROVIDER_REGISTRY.load_full()
}

/// 向全局注册表注册方言工厂，已存在时替换
///
/// 采用写时复制，已经取得快照的构建过程不受影响
pub fn register_provider<F>(db_type: DatabaseType, factory: F)
where
    F: Fn(ProviderContext) -> QuickSqlResult<Option<Arc<dyn DatabaseProvider>>> + Send + Sync + 'static,
{
    let factory: ProviderFactory = Arc::new(factory);
    GLOBAL_PROVIDER_REGISTRY.rcu(|current| {
        let mut next = (**current).clone();
        next.register_factory(db_type, factory.clone());
        next
    });
    info!("注册方言工厂: {}", db_type);
}
