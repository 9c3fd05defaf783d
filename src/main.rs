use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use traffic_backend::{
    AppState,
    cache::RedisTrafficCache,
    config::Config,
    router::create_router,
    traffic::{TrafficApiClient, TrafficFetcher},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // 初始化日志
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 加载配置
    let config = Config::from_env().expect("Failed to load configuration");

    #[cfg(debug_assertions)]
    tracing::info!("Running in debug mode with CORS enabled");

    #[cfg(not(debug_assertions))]
    tracing::info!("Running in production mode with CORS disabled");

    // 设置 Redis 客户端，整个进程共享一个
    let redis_client =
        redis::Client::open(config.redis_url.clone()).expect("Failed to create Redis client");
    let cache = Arc::new(RedisTrafficCache::new(
        Arc::new(redis_client),
        config.redis_timeout(),
    ));

    // 上游客户端
    let client = TrafficApiClient::new(&config).expect("Failed to create HTTP client");

    // 设置应用状态
    let state = AppState {
        fetcher: Arc::new(TrafficFetcher::new(
            cache,
            client,
            config.traffic_cache_ttl(),
        )),
        config: config.clone(),
    };

    let app = create_router(state.clone());

    // 启动服务器
    let addr = SocketAddr::new(
        state.config.server_host.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid server_host, falling back to dual-stack default");
            IpAddr::V6(std::net::Ipv6Addr::UNSPECIFIED)
        }),
        state.config.server_port,
    );
    tracing::info!("Server listening on {}", addr);
    axum::serve(
        tokio::net::TcpListener::bind(&addr)
            .await
            .expect("Failed to bind"),
        app,
    )
    .await
    .expect("Failed to start server");
}
