use axum::{
    extract::State,
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::AppState;
use crate::error::AppError;

/// GET /traffic
///
/// 始终返回 200，失败信息在 JSON 响应体里。
#[axum::debug_handler]
pub async fn get_traffic(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let data = state.fetcher.fetch_traffic_data().await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        data,
    ))
}
