mod config;
mod rate_limit;
mod view;

use std::sync::Arc;

use axum::body::Body;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Json, Query, State};
use axum::http::{header, HeaderValue, Method, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use viewport_core::{Intent, ResolveRequest};
use viewport_observability::ResolverMetrics;
use viewport_service::{Resolved, ViewService};

pub use crate::config::{ApiConfig, ConfigError};
use crate::rate_limit::ClientRateLimiter;
pub use crate::view::{render_view_page, IFRAME_SANDBOX, VIEW_CONTENT_SECURITY_POLICY};

const MAX_BODY_BYTES: usize = 16 * 1024;
const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct ApiState {
    pub service: Arc<ViewService>,
    pub metrics: Arc<ResolverMetrics>,
    pub api_key: Arc<str>,
    limiter: ClientRateLimiter,
    pub allowed_origins: Arc<Vec<String>>,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> Self {
        let metrics = ResolverMetrics::shared();
        Self {
            service: Arc::new(ViewService::new(metrics.clone())),
            metrics,
            api_key: Arc::from(config.api_key.as_str()),
            limiter: ClientRateLimiter::new(config.rate_limit_window, config.rate_limit_max),
            allowed_origins: Arc::new(config.allowed_origins.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    timestamp_utc: String,
    metrics: viewport_observability::MetricsSnapshot,
}

#[derive(Debug, Deserialize)]
struct ClassifyRequest {
    #[serde(default)]
    query: String,
}

pub fn build_app(config: &ApiConfig) -> Router {
    build_router(ApiState::new(config))
}

pub fn build_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/v1/classify", post(classify))
        .route("/v1/resolve", post(resolve))
        .route("/v1/view", get(view))
        .layer(build_cors_layer(&state.allowed_origins))
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health(State(state): State<ApiState>) -> impl IntoResponse {
    let payload = HealthResponse {
        status: "ok",
        timestamp_utc: chrono::Utc::now().to_rfc3339(),
        metrics: state.metrics.snapshot(),
    };
    (StatusCode::OK, Json(payload))
}

async fn classify(
    State(state): State<ApiState>,
    payload: Result<Json<ClassifyRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(input)) => {
            let intent: Intent = state.service.classify(&input.query);
            (StatusCode::OK, Json(intent)).into_response()
        }
        Err(rejection) => invalid_request(rejection.status(), &rejection.body_text()),
    }
}

async fn resolve(
    State(state): State<ApiState>,
    payload: Result<Json<ResolveRequest>, JsonRejection>,
) -> Response {
    match payload {
        Ok(Json(input)) => {
            let resolved: Resolved = state.service.resolve(&input);
            (StatusCode::OK, Json(resolved)).into_response()
        }
        Err(rejection) => invalid_request(rejection.status(), &rejection.body_text()),
    }
}

async fn view(
    State(state): State<ApiState>,
    query: Result<Query<ResolveRequest>, QueryRejection>,
) -> Response {
    let input = match query {
        Ok(Query(input)) => input,
        Err(rejection) => return invalid_request(rejection.status(), &rejection.body_text()),
    };
    let resolved = state.service.resolve(&input);
    let mut response = (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        render_view_page(&resolved.href),
    )
        .into_response();
    response.headers_mut().insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static(VIEW_CONTENT_SECURITY_POLICY),
    );
    response
}

fn is_public_endpoint(path: &str) -> bool {
    matches!(path, "/health" | "/v1/view")
}

fn invalid_request(status: StatusCode, message: &str) -> Response {
    error_response(status, "invalid_request", message)
}

fn error_response(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": error,
            "message": message
        })),
    )
        .into_response()
}

async fn api_key_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || is_public_endpoint(request.uri().path()) {
        return next.run(request).await;
    }

    let header_key = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    if header_key != &*state.api_key {
        return error_response(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing or invalid x-api-key",
        );
    }

    next.run(request).await
}

async fn rate_limit_middleware(
    State(state): State<ApiState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if request.method() == Method::OPTIONS || request.uri().path() == "/health" {
        return next.run(request).await;
    }

    let client = request_client(&request);
    if let Err(retry_after) = state.limiter.check(&client) {
        tracing::warn!(client = %client, "rate limit exceeded");
        let mut response = error_response(
            StatusCode::TOO_MANY_REQUESTS,
            "rate_limited",
            "rate limit exceeded for this client",
        );
        let seconds = retry_after.as_secs().max(1).to_string();
        if let Ok(value) = HeaderValue::from_str(&seconds) {
            response.headers_mut().insert(header::RETRY_AFTER, value);
        }
        return response;
    }

    next.run(request).await
}

fn request_client(request: &Request<Body>) -> String {
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .unwrap_or_else(|| "local".to_string())
}

fn build_cors_layer(allowed_origins: &Arc<Vec<String>>) -> CorsLayer {
    let origins = allowed_origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static(API_KEY_HEADER),
        ])
}

async fn security_headers_middleware(request: Request<Body>, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );
    if !headers.contains_key(header::CONTENT_SECURITY_POLICY) {
        headers.insert(
            header::CONTENT_SECURITY_POLICY,
            HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'; base-uri 'none'"),
        );
        headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    }

    response
}

#[cfg(test)]
mod tests {
    use super::{is_public_endpoint, request_client};
    use axum::body::Body;
    use axum::http::Request;

    #[test]
    fn only_health_and_view_are_public() {
        assert!(is_public_endpoint("/health"));
        assert!(is_public_endpoint("/v1/view"));
        assert!(!is_public_endpoint("/v1/resolve"));
        assert!(!is_public_endpoint("/v1/classify"));
    }

    #[test]
    fn client_comes_from_first_forwarded_hop() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(request_client(&request), "203.0.113.9");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(request_client(&request), "local");
    }
}
