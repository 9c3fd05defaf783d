use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{error, info};

pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(req).await;
    let status = response.status();
    let elapsed = started.elapsed();

    if status.is_server_error() {
        error!(%method, %path, %status, ?elapsed, "Server error occurred");
    } else {
        info!(%method, %path, %status, ?elapsed, "Request handled");
    }

    response
}
