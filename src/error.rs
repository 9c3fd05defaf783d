use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// 缓存存储（Redis）不可用或协议错误
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("redis error: {0}")]
    Redis(#[from] redis::RedisError),
    #[error("redis did not answer within {0:?}")]
    Timeout(std::time::Duration),
}

/// 上游请求与 GeoJSON 转换过程中的错误
#[derive(Debug, Error)]
pub enum TrafficError {
    #[error("failed to fetch traffic data: {0}")]
    Fetch(#[source] reqwest::Error),
    #[error("received non-200 status code: {0}")]
    InvalidStatus(reqwest::StatusCode),
    #[error("failed to read response body: {0}")]
    Read(#[source] reqwest::Error),
    #[error("failed to parse traffic data: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("failed to generate GeoJSON: {0}")]
    Encode(#[source] serde_json::Error),
}

impl TrafficError {
    /// 对外兼容的固定错误载荷
    pub fn payload(&self) -> &'static str {
        match self {
            TrafficError::Fetch(_) => r#"{"error": "Failed to fetch traffic data"}"#,
            TrafficError::InvalidStatus(_) => r#"{"error": "Invalid response from traffic API"}"#,
            TrafficError::Read(_) => r#"{"error": "Failed to read traffic data"}"#,
            TrafficError::Parse(_) => r#"{"error": "Failed to parse traffic data"}"#,
            TrafficError::Encode(_) => r#"{"error": "Failed to generate GeoJSON"}"#,
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),
    #[error(transparent)]
    Upstream(#[from] TrafficError),
}

impl AppError {
    pub fn body(&self) -> &'static str {
        match self {
            // 缓存不可用时降级为空数组
            AppError::CacheUnavailable(_) => "[]",
            AppError::Upstream(e) => e.payload(),
        }
    }
}

// 错误只体现在响应体里，状态码始终是 200
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "application/json")],
            self.body(),
        )
            .into_response()
    }
}
