use reqwest::{Client, StatusCode};

use super::transform;
use crate::config::Config;
use crate::error::TrafficError;

/// 上游交通预警接口客户端
#[derive(Clone)]
pub struct TrafficApiClient {
    client: Client,
    url: String,
}

impl TrafficApiClient {
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(config.traffic_api_timeout())
            .build()?;

        Ok(Self {
            client,
            url: config.traffic_api_url.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// 请求一次上游接口并转换为 GeoJSON，不重试
    pub async fn get_traffic_data(&self) -> Result<String, TrafficError> {
        let response = self.client.get(&self.url).send().await.map_err(|e| {
            tracing::error!("Error fetching traffic data: {}", e);
            TrafficError::Fetch(e)
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            tracing::error!("Received non-200 status code: {}", status);
            return Err(TrafficError::InvalidStatus(status));
        }

        let body = response.bytes().await.map_err(|e| {
            tracing::error!("Error reading response body: {}", e);
            TrafficError::Read(e)
        })?;

        transform::to_geojson(&body).inspect_err(|e| {
            tracing::error!("Error converting traffic data: {}", e);
        })
    }
}
