// 交通预警模块
// 上游请求、GeoJSON 转换和缓存旁路读取

pub mod client;
pub mod fetcher;
pub mod models;
pub mod transform;

pub use client::TrafficApiClient;
pub use fetcher::TrafficFetcher;
pub use models::{
    Feature, FeatureCollection, Geometry, RawWarning, WarningPayload, WarningProperties,
};
pub use transform::{build_feature_collection, to_geojson};
