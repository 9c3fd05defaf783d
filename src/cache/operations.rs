use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};

use super::TrafficCache;
use crate::error::CacheError;

/// 基于 Redis 的缓存操作
#[derive(Clone)]
pub struct RedisTrafficCache {
    redis_client: Arc<RedisClient>,
    timeout: Duration,
}

impl RedisTrafficCache {
    /// `timeout` 限制一次完整的往返（建立连接加命令应答）
    pub fn new(redis_client: Arc<RedisClient>, timeout: Duration) -> Self {
        Self {
            redis_client,
            timeout,
        }
    }

    async fn bounded<T, F>(&self, op: F) -> Result<T, CacheError>
    where
        F: Future<Output = Result<T, redis::RedisError>>,
    {
        tokio::time::timeout(self.timeout, op)
            .await
            .map_err(|_| CacheError::Timeout(self.timeout))?
            .map_err(CacheError::from)
    }
}

#[async_trait]
impl TrafficCache for RedisTrafficCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.bounded(async {
            let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
            // nil 回复会被映射为 None
            conn.get::<_, Option<String>>(key).await
        })
        .await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        // SETEX 不接受 0 秒
        let seconds = ttl.as_secs().max(1);
        self.bounded(async {
            let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
            conn.set_ex::<_, _, ()>(key, value, seconds).await
        })
        .await
    }
}
