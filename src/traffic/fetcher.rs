use std::sync::Arc;
use std::time::Duration;

use super::client::TrafficApiClient;
use crate::cache::{TRAFFIC_DATA_KEY, TrafficCache};
use crate::error::AppError;

/// 缓存旁路读取：先查缓存，未命中时请求上游并回填
///
/// 并发的未命中各自请求上游，后写入者覆盖前者。
pub struct TrafficFetcher {
    cache: Arc<dyn TrafficCache>,
    client: TrafficApiClient,
    ttl: Duration,
}

impl TrafficFetcher {
    pub fn new(cache: Arc<dyn TrafficCache>, client: TrafficApiClient, ttl: Duration) -> Self {
        Self { cache, client, ttl }
    }

    pub async fn fetch_traffic_data(&self) -> Result<String, AppError> {
        let cached = self
            .cache
            .get(TRAFFIC_DATA_KEY)
            .await
            .inspect_err(|e| tracing::error!("Redis error: {}", e))?;

        if let Some(data) = cached {
            tracing::debug!("Cache hit: {}", TRAFFIC_DATA_KEY);
            return Ok(data);
        }

        tracing::info!("Cache miss, fetching from {}", self.client.url());
        // 错误载荷不写入缓存，下次请求重新访问上游
        let data = self.client.get_traffic_data().await?;

        if let Err(e) = self.cache.set_ex(TRAFFIC_DATA_KEY, &data, self.ttl).await {
            tracing::warn!("Failed to cache traffic data: {}", e);
        } else {
            tracing::debug!("Set traffic data to cache: {}", TRAFFIC_DATA_KEY);
        }

        Ok(data)
    }
}
