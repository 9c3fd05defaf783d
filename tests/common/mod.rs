#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::get,
};
use tower::ServiceExt;
use traffic_backend::{
    AppState,
    cache::TrafficCache,
    config::Config,
    error::CacheError,
    router::create_router,
    traffic::{TrafficApiClient, TrafficFetcher},
};

fn refused() -> CacheError {
    CacheError::from(redis::RedisError::from((
        redis::ErrorKind::IoError,
        "connection refused",
    )))
}

/// 内存缓存，记录读写次数
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, Duration)>>,
    gets: AtomicUsize,
    sets: AtomicUsize,
    fail_writes: bool,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::new();
        cache.entries.lock().unwrap().insert(
            key.to_string(),
            (value.to_string(), Duration::from_secs(300)),
        );
        cache
    }

    pub fn failing_writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn entry(&self, key: &str) -> Option<(String, Duration)> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TrafficCache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        Ok(self.entries.lock().unwrap().get(key).map(|(v, _)| v.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<(), CacheError> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes {
            return Err(refused());
        }
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl));
        Ok(())
    }
}

/// 每次读取都失败的缓存
pub struct UnreachableCache;

#[async_trait]
impl TrafficCache for UnreachableCache {
    async fn get(&self, _key: &str) -> Result<Option<String>, CacheError> {
        Err(refused())
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> Result<(), CacheError> {
        Err(refused())
    }
}

/// 本地模拟的上游接口
pub struct Upstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

pub async fn spawn_upstream(status: StatusCode, body: &'static str) -> Upstream {
    spawn_upstream_with_delay(status, body, Duration::ZERO).await
}

pub async fn spawn_upstream_with_delay(
    status: StatusCode,
    body: &'static str,
    delay: Duration,
) -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/o/autobahn/A1/services/warning",
        get(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    Upstream {
        url: format!("http://{addr}/o/autobahn/A1/services/warning"),
        hits,
    }
}

pub fn test_config(upstream_url: &str) -> Config {
    let upstream_url = upstream_url.to_string();
    Config::from_lookup(|key| match key {
        "TRAFFIC_API_URL" => Some(upstream_url.clone()),
        "TRAFFIC_API_TIMEOUT" => Some("1".to_string()),
        _ => None,
    })
    .unwrap()
}

pub fn fetcher(cache: Arc<dyn TrafficCache>, upstream_url: &str) -> TrafficFetcher {
    let config = test_config(upstream_url);
    let client = TrafficApiClient::new(&config).unwrap();
    TrafficFetcher::new(cache, client, config.traffic_cache_ttl())
}

pub fn app(cache: Arc<dyn TrafficCache>, upstream_url: &str) -> Router {
    let state = AppState {
        config: test_config(upstream_url),
        fetcher: Arc::new(fetcher(cache, upstream_url)),
    };
    create_router(state)
}

/// 发送 GET /traffic，返回状态码、Content-Type 和响应体
pub async fn get_traffic(app: Router) -> (StatusCode, Option<String>, String) {
    let response = app
        .oneshot(
            Request::builder()
                .uri("/traffic")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}
