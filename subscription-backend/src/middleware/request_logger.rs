// src/middleware/request_logger.rs
use axum::{extract::Request, http::header, middleware::Next, response::Response};
use std::time::Instant;
use tracing::info;

/// リクエストの開始と完了をログに記録するミドルウェア
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
        .to_string();
    let start = Instant::now();

    info!(%method, %path, %user_agent, "request started");

    let response = next.run(request).await;

    info!(
        %method,
        %path,
        status = response.status().as_u16(),
        duration_ms = start.elapsed().as_millis() as u64,
        "request completed"
    );

    response
}
