use serde::{Deserialize, Serialize};
use serde_json::Value;

/// GeoJSON 坐标，顺序为 [经度, 纬度]
pub type Position = [f64; 2];

/// 上游响应体，只使用 `warning` 列表
#[derive(Debug, Deserialize)]
pub struct WarningPayload {
    #[serde(default)]
    pub warning: Option<Vec<RawWarning>>,
}

/// 上游的单条预警记录，所有字段都可能缺失
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawWarning {
    pub point: Option<Value>, // "lat,lon"
    pub geometry: Option<Value>,
    pub title: Option<Value>,
    pub subtitle: Option<Value>,
    pub abnormal_traffic_type: Option<Value>,
    pub average_speed: Option<Value>,
    pub start_timestamp: Option<Value>,
    pub description: Option<Value>,
}

/// 线要素和点要素共用的属性，原样透传，缺失字段输出为 null
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarningProperties {
    pub title: Option<Value>,
    pub subtitle: Option<Value>,
    pub abnormal_traffic_type: Option<Value>,
    pub average_speed: Option<Value>,
    pub start_timestamp: Option<Value>,
    pub description: Option<Value>,
}

impl From<RawWarning> for WarningProperties {
    fn from(warning: RawWarning) -> Self {
        Self {
            title: warning.title,
            subtitle: warning.subtitle,
            abnormal_traffic_type: warning.abnormal_traffic_type,
            average_speed: warning.average_speed,
            start_timestamp: warning.start_timestamp,
            description: warning.description,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Geometry {
    LineString { coordinates: Vec<Position> },
    Point { coordinates: Position },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    kind: &'static str,
    pub geometry: Geometry,
    pub properties: WarningProperties,
}

impl Feature {
    pub fn new(geometry: Geometry, properties: WarningProperties) -> Self {
        Self {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    kind: &'static str,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}
