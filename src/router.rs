use axum::{Router, routing::get};

use crate::{AppState, middleware::log_requests, routes};

// 交通数据路由
pub fn traffic_routes() -> Router<AppState> {
    Router::new().route("/traffic", get(routes::traffic::get_traffic))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let router = traffic_routes().layer(axum::middleware::from_fn(log_requests));

    // 开发模式下允许所有来源，方便浏览器地图直接调用
    #[cfg(debug_assertions)]
    let router = router.layer(tower_http::cors::CorsLayer::permissive());

    router.with_state(state)
}
