use std::sync::Arc;

use config::Config;
use traffic::TrafficFetcher;

pub mod cache;
pub mod config;
pub mod error;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod traffic;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub fetcher: Arc<TrafficFetcher>,
}
