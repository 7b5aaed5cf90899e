//! 缓存模块
//!
//! 提供者只依赖 [`DistributedCache`] 能力，由调用方注入；
//! 未注入时使用进程内的 [`MemoryCache`]。

pub mod memory_cache;

pub use memory_cache::MemoryCache;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::error::QuickSqlResult;

/// 分布式缓存能力
///
/// 键为不透明字符串，值为字节序列。实现必须可在多线程间共享。
pub trait DistributedCache: Send + Sync {
    /// 读取缓存值，不存在或已过期时返回 `None`
    fn get(&self, key: &str) -> Option<Vec<u8>>;

    /// 写入缓存值，`ttl` 为 `None` 时永不过期
    fn set(&self, key: &str, value: Vec<u8>, ttl: Option<Duration>);

    /// 删除缓存值，返回删除前是否存在
    fn remove(&self, key: &str) -> bool;

    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// 以 JSON 形式读取并反序列化
    fn get_json<T: DeserializeOwned>(&self, key: &str) -> QuickSqlResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(key) {
            Some(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(|e| crate::quick_error!(cache, format!("反序列化缓存值 {} 失败: {}", key, e))),
            None => Ok(None),
        }
    }

    /// 序列化为 JSON 后写入
    fn set_json<T: Serialize>(&self, key: &str, value: &T, ttl: Option<Duration>) -> QuickSqlResult<()>
    where
        Self: Sized,
    {
        let bytes = serde_json::to_vec(value)
            .map_err(|e| crate::quick_error!(cache, format!("序列化缓存值 {} 失败: {}", key, e)))?;
        self.set(key, bytes, ttl);
        Ok(())
    }
}
