// tests/common/request.rs
use axum::{
    body::Body,
    http::{header, Method, Request},
};
use serde_json::Value;

/// JSONボディ付きのHTTPリクエストを作成
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    let method = Method::from_bytes(method.as_bytes()).unwrap();

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// 生の文字列ボディ付きのHTTPリクエストを作成（不正なJSONのテスト用）
pub fn raw_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    let method = Method::from_bytes(method.as_bytes()).unwrap();

    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// ボディなしのHTTPリクエストを作成
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    let method = Method::from_bytes(method.as_bytes()).unwrap();

    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
