use std::env;
use std::time::Duration;

use thiserror::Error;

use crate::cache::TRAFFIC_CACHE_EXPIRE;

/// 默认上游接口：A1 高速公路的交通预警
pub const DEFAULT_TRAFFIC_API_URL: &str =
    "https://verkehr.autobahn.de/o/autobahn/A1/services/warning";
const DEFAULT_REDIS_ADDR: &str = "redis:6379";
const DEFAULT_SERVER_HOST: &str = "0.0.0.0";
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_TRAFFIC_API_TIMEOUT_SECS: u64 = 10;
const DEFAULT_REDIS_TIMEOUT_SECS: u64 = 3;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone, serde::Deserialize)]
pub struct Config {
    pub redis_url: String,
    pub redis_timeout_secs: u64,
    pub server_host: String,
    pub server_port: u16,
    pub traffic_api_url: String,
    pub traffic_api_timeout_secs: u64,
    pub traffic_cache_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// 从任意键值来源构建配置，空字符串视为未设置
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        // REDIS_URL 优先，其次是 host:port 形式的 REDIS_ADDR
        let redis_url = match get("REDIS_URL") {
            Some(url) => url,
            None => {
                let addr = get("REDIS_ADDR").unwrap_or_else(|| DEFAULT_REDIS_ADDR.to_string());
                format!("redis://{}/", addr.trim())
            }
        };

        Ok(Config {
            redis_url,
            redis_timeout_secs: parse_or(
                get("REDIS_TIMEOUT"),
                "REDIS_TIMEOUT",
                DEFAULT_REDIS_TIMEOUT_SECS,
            )?,
            server_host: get("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            server_port: parse_or(get("SERVER_PORT"), "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            traffic_api_url: get("TRAFFIC_API_URL")
                .unwrap_or_else(|| DEFAULT_TRAFFIC_API_URL.to_string()),
            traffic_api_timeout_secs: parse_or(
                get("TRAFFIC_API_TIMEOUT"),
                "TRAFFIC_API_TIMEOUT",
                DEFAULT_TRAFFIC_API_TIMEOUT_SECS,
            )?,
            traffic_cache_ttl_secs: parse_or(
                get("TRAFFIC_CACHE_TTL"),
                "TRAFFIC_CACHE_TTL",
                TRAFFIC_CACHE_EXPIRE,
            )?,
        })
    }

    pub fn redis_timeout(&self) -> Duration {
        Duration::from_secs(self.redis_timeout_secs)
    }

    pub fn traffic_api_timeout(&self) -> Duration {
        Duration::from_secs(self.traffic_api_timeout_secs)
    }

    pub fn traffic_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.traffic_cache_ttl_secs)
    }
}

fn parse_or<T: std::str::FromStr>(
    raw: Option<String>,
    key: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .trim_end_matches('s')
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}
