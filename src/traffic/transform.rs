//! 上游预警数据到 GeoJSON FeatureCollection 的转换。
//!
//! 每条带有效几何的预警生成两个要素：先是 LineString，然后是 Point，
//! 两者携带相同的属性。几何无效的记录会被跳过，不影响后续记录。

use serde_json::Value;
use thiserror::Error;

use super::models::{
    Feature, FeatureCollection, Geometry, Position, RawWarning, WarningPayload, WarningProperties,
};
use crate::error::TrafficError;

#[derive(Debug, Error, PartialEq)]
enum SkipReason {
    #[error("geometry is missing or not an object")]
    NoGeometry,
    #[error("geometry.coordinates is missing or not an array")]
    NoCoordinates,
    #[error("coordinate #{0} is not a [longitude, latitude] pair")]
    BadCoordinate(usize),
}

/// 解析上游响应体并序列化为 GeoJSON 字符串
pub fn to_geojson(body: &[u8]) -> Result<String, TrafficError> {
    let payload: WarningPayload = serde_json::from_slice(body).map_err(TrafficError::Parse)?;
    let collection = build_feature_collection(payload.warning.unwrap_or_default());
    serde_json::to_string(&collection).map_err(TrafficError::Encode)
}

pub fn build_feature_collection(warnings: Vec<RawWarning>) -> FeatureCollection {
    let mut features = Vec::with_capacity(warnings.len() * 2);

    for (index, warning) in warnings.into_iter().enumerate() {
        let line = match line_coordinates(warning.geometry.as_ref()) {
            Ok(line) => line,
            Err(SkipReason::NoGeometry) => {
                tracing::debug!(index, "Skipping warning without geometry");
                continue;
            }
            Err(reason) => {
                tracing::warn!(index, %reason, "Skipping malformed warning");
                continue;
            }
        };

        let point = warning.point.as_ref().and_then(Value::as_str).unwrap_or("");
        let (lat, lon) = parse_point(point);
        let properties = WarningProperties::from(warning);

        features.push(Feature::new(
            Geometry::LineString { coordinates: line },
            properties.clone(),
        ));
        features.push(Feature::new(
            Geometry::Point {
                coordinates: [lon, lat],
            },
            properties,
        ));
    }

    FeatureCollection::new(features)
}

fn line_coordinates(geometry: Option<&Value>) -> Result<Vec<Position>, SkipReason> {
    let geometry = geometry
        .and_then(Value::as_object)
        .ok_or(SkipReason::NoGeometry)?;
    let coordinates = geometry
        .get("coordinates")
        .and_then(Value::as_array)
        .ok_or(SkipReason::NoCoordinates)?;

    coordinates
        .iter()
        .enumerate()
        .map(|(i, coord)| {
            // 多余的分量（如海拔）忽略
            match coord.as_array().map(Vec::as_slice) {
                Some([lon, lat, ..]) => match (lon.as_f64(), lat.as_f64()) {
                    (Some(lon), Some(lat)) => Ok([lon, lat]),
                    _ => Err(SkipReason::BadCoordinate(i)),
                },
                _ => Err(SkipReason::BadCoordinate(i)),
            }
        })
        .collect()
}

/// 按 "%f,%f" 扫描 "lat,lon"：第一个失败之后的值保持为 0
fn parse_point(raw: &str) -> (f64, f64) {
    let Some((lat, rest)) = scan_float(raw) else {
        return (0.0, 0.0);
    };
    // 逗号必须紧跟在纬度之后
    let lon = rest
        .strip_prefix(',')
        .and_then(scan_float)
        .map_or(0.0, |(lon, _)| lon);
    (lat, lon)
}

/// 跳过前导空白，读取最长的十进制浮点前缀；NaN 和无穷大视为失败
fn scan_float(input: &str) -> Option<(f64, &str)> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    let value: f64 = s[..end].parse().ok()?;
    value.is_finite().then_some((value, &s[end..]))
}
