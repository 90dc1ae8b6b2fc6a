use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use viewport_core::HELP_DOCUMENT;
use viewport_tests::{body_json, body_text, json_post, send, test_app, test_app_with};

#[tokio::test]
async fn health_is_public() {
    let app = test_app();

    let response = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let parsed = body_json(response).await;
    assert_eq!(parsed["status"], "ok");
    assert_eq!(parsed["metrics"]["resolutions_total"], 0);
}

#[tokio::test]
async fn resolve_requires_api_key() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/resolve")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "query": "add 1 and 2" }).to_string()))
        .unwrap();

    let response = send(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "unauthorized");
}

#[tokio::test]
async fn resolve_addition_returns_inline_document() {
    let app = test_app();

    let response = send(&app, json_post("/v1/resolve", json!({ "query": "add 300 and 200" }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["intent"]["intent"], "arithmetic");
    assert_eq!(parsed["intent"]["a"], "300");
    assert_eq!(parsed["resolution"]["kind"], "inline_document");
    assert_eq!(parsed["resolution"]["mime_type"], "text/html");
    assert!(parsed["resolution"]["body"]
        .as_str()
        .unwrap()
        .contains("300 + 200 = 500"));
    assert!(parsed["href"]
        .as_str()
        .unwrap()
        .starts_with("data:text/html;charset=utf-8,"));
}

#[tokio::test]
async fn resolve_person_lookup_returns_wikipedia() {
    let app = test_app();

    let response = send(
        &app,
        json_post("/v1/resolve", json!({ "query": "who is 'Sachin Tendulkar'" })),
    )
    .await;

    let parsed = body_json(response).await;
    assert_eq!(parsed["resolution"]["kind"], "external_address");
    assert_eq!(
        parsed["resolution"]["url"],
        "https://en.wikipedia.org/wiki/Sachin_Tendulkar"
    );
}

#[tokio::test]
async fn explicit_url_wins_over_query() {
    let app = test_app();

    let response = send(
        &app,
        json_post(
            "/v1/resolve",
            json!({ "query": "add 1 and 2", "url": "https://example.com" }),
        ),
    )
    .await;

    let parsed = body_json(response).await;
    assert!(parsed["intent"].is_null());
    assert_eq!(parsed["href"], "https://example.com");
}

#[tokio::test]
async fn empty_request_gets_help_document() {
    let app = test_app();

    let response = send(&app, json_post("/v1/resolve", json!({}))).await;
    let parsed = body_json(response).await;
    assert_eq!(parsed["intent"]["intent"], "unresolved");
    assert_eq!(parsed["resolution"]["body"], HELP_DOCUMENT);
}

#[tokio::test]
async fn malformed_json_is_a_structured_error() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/v1/resolve")
        .header("content-type", "application/json")
        .header("x-api-key", viewport_tests::TEST_API_KEY)
        .body(Body::from("{not json"))
        .unwrap();

    let response = send(&app, request).await;
    assert!(response.status().is_client_error());
    assert_eq!(body_json(response).await["error"], "invalid_request");
}

#[tokio::test]
async fn classify_reports_intent() {
    let app = test_app();

    let response = send(&app, json_post("/v1/classify", json!({ "query": "who is" }))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let parsed = body_json(response).await;
    assert_eq!(parsed["intent"], "person_lookup");
    assert!(parsed["subject_title"].is_null());
}

#[tokio::test]
async fn view_frames_resolution_in_sandbox() {
    let app = test_app();

    let response = send(
        &app,
        Request::builder()
            .uri("/v1/view?query=who%20is%20%27Ada%20Lovelace%27")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let csp = response
        .headers()
        .get("content-security-policy")
        .and_then(|value| value.to_str().ok())
        .unwrap()
        .to_string();
    assert!(csp.contains("frame-src http: https: data:"));

    let page = body_text(response).await;
    assert!(page.contains(r#"src="https://en.wikipedia.org/wiki/Ada_Lovelace""#));
    assert!(page.contains(viewport_api::IFRAME_SANDBOX));
    assert!(page.contains(r#"referrerpolicy="no-referrer""#));
}

#[tokio::test]
async fn view_rejects_malformed_query_with_json_error() {
    let app = test_app();

    let response = send(
        &app,
        Request::builder()
            .uri("/v1/view?query=a&query=b")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let parsed = body_json(response).await;
    assert_eq!(parsed["error"], "invalid_request");
    assert!(parsed["message"].is_string());
}

#[tokio::test]
async fn metrics_follow_resolutions() {
    let app = test_app();

    send(&app, json_post("/v1/resolve", json!({ "query": "add 1 and 2" }))).await;
    send(&app, json_post("/v1/resolve", json!({ "query": "ftp://example.com" }))).await;

    let response = send(
        &app,
        Request::builder().uri("/health").body(Body::empty()).unwrap(),
    )
    .await;
    let metrics = body_json(response).await["metrics"].clone();
    assert_eq!(metrics["resolutions_total"], 2);
    assert_eq!(metrics["arithmetic_total"], 1);
    assert_eq!(metrics["unresolved_total"], 1);
    assert_eq!(metrics["inline_documents_total"], 2);
}

#[tokio::test]
async fn rate_limit_rejects_excess_requests() {
    let app = test_app_with(|config| config.rate_limit_max = 1);

    let first = send(&app, json_post("/v1/resolve", json!({ "query": "x" }))).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = send(&app, json_post("/v1/resolve", json!({ "query": "x" }))).await;
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);
    assert!(second.headers().contains_key("retry-after"));
}
