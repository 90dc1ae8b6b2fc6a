//! Shared helpers for the end-to-end tests under `tests/`.

use axum::body::{to_bytes, Body};
use axum::http::{Request, Response};
use axum::Router;
use tower::ServiceExt;
use viewport_api::{build_app, ApiConfig};

pub const TEST_API_KEY: &str = "test-viewport-key";

pub fn test_app() -> Router {
    test_app_with(|_| {})
}

pub fn test_app_with(adjust: impl FnOnce(&mut ApiConfig)) -> Router {
    let mut config = ApiConfig {
        api_key: TEST_API_KEY.to_string(),
        ..ApiConfig::default()
    };
    adjust(&mut config);
    build_app(&config)
}

pub fn json_post(uri: &str, payload: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-api-key", TEST_API_KEY)
        .body(Body::from(payload.to_string()))
        .expect("valid request")
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}
