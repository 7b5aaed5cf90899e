//! 内置方言提供者
//!
//! 五种内置方言共用一个实现：校验主从连接串、补齐默认缓存与日志、
//! 创建全新的策略面和命令执行面。驱动通过 `ado().attach_executor` 挂载。

use rat_logger::debug;
use std::fmt;
use std::sync::Arc;

use super::{CodeFirst, DatabaseProvider, ProviderContext};
use crate::ado::AdoProvider;
use crate::cache::{DistributedCache, MemoryCache};
use crate::error::QuickSqlResult;
use crate::logging::{RatLoggerSink, SqlLogger};
use crate::types::{ConnectionInfo, DatabaseType};

/// 内置方言提供者
pub struct DialectProvider {
    db_type: DatabaseType,
    code_first: CodeFirst,
    ado: AdoProvider,
    cache: Arc<dyn DistributedCache>,
    logger: Arc<dyn SqlLogger>,
}

impl DialectProvider {
    /// 按方言构造提供者
    ///
    /// # 错误
    ///
    /// 主库或任一从库连接串非法时返回 [`QuickSqlError::ConnectionError`](crate::QuickSqlError::ConnectionError)，
    /// 此时不会产生任何提供者
    pub fn new(db_type: DatabaseType, context: ProviderContext) -> QuickSqlResult<Self> {
        let master = ConnectionInfo::parse(db_type, &context.master_connection_string)?;
        let slaves = context
            .slave_connection_strings
            .iter()
            .map(|s| ConnectionInfo::parse(db_type, s))
            .collect::<QuickSqlResult<Vec<_>>>()?;

        let cache = context
            .cache
            .unwrap_or_else(|| Arc::new(MemoryCache::new()) as Arc<dyn DistributedCache>);
        let logger = context
            .logger
            .unwrap_or_else(|| Arc::new(RatLoggerSink) as Arc<dyn SqlLogger>);

        debug!(
            "创建{}提供者: 主库={}, 从库数量={}",
            db_type,
            master.masked(),
            slaves.len()
        );

        Ok(Self {
            db_type,
            code_first: CodeFirst::new(),
            ado: AdoProvider::new(db_type, master, slaves, logger.clone()),
            cache,
            logger,
        })
    }
}

impl DatabaseProvider for DialectProvider {
    fn db_type(&self) -> DatabaseType {
        self.db_type
    }

    fn code_first(&self) -> &CodeFirst {
        &self.code_first
    }

    fn ado(&self) -> &AdoProvider {
        &self.ado
    }

    fn cache(&self) -> &Arc<dyn DistributedCache> {
        &self.cache
    }

    fn logger(&self) -> &Arc<dyn SqlLogger> {
        &self.logger
    }
}

impl fmt::Debug for DialectProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DialectProvider")
            .field("db_type", &self.db_type)
            .field("code_first", &self.code_first)
            .field("ado", &self.ado)
            .finish_non_exhaustive()
    }
}
