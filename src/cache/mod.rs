// 缓存模块
// 包含缓存键和 Redis 操作逻辑

pub mod keys;
pub mod operations;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

pub use keys::{TRAFFIC_CACHE_EXPIRE, TRAFFIC_DATA_KEY};
pub use operations::RedisTrafficCache;

/// 键值缓存存储
///
/// `get` 用 `Ok(None)` 表示键不存在，其余失败都是 `Err`。
#[async_trait]
pub trait TrafficCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError>;
}
