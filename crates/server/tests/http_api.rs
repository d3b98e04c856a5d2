//! HTTP API tests with stubbed collaborators.
//!
//! The summarizer and renderer are bound to stubs so the suite needs neither
//! network access nor a Graphviz installation.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use flowmap_flowchart::PngRenderer;
use flowmap_server::routes::AnalysisResult;
use flowmap_server::{build_router, AppState};
use flowmap_summarizer::{Summarize, SummarizerError};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use tower::ServiceExt;

const FAKE_PNG: &[u8] = b"\x89PNG\r\n\x1a\nfakeimagedata";

struct StubSummarizer;

#[async_trait]
impl Summarize for StubSummarizer {
    async fn summarize(&self, _code: &str) -> flowmap_summarizer::Result<String> {
        Ok("A function that does nothing.".to_string())
    }
}

struct FailingSummarizer;

#[async_trait]
impl Summarize for FailingSummarizer {
    async fn summarize(&self, _code: &str) -> flowmap_summarizer::Result<String> {
        Err(SummarizerError::Status {
            status: 429,
            body: "quota exceeded".to_string(),
        })
    }
}

struct StubRenderer;

#[async_trait]
impl PngRenderer for StubRenderer {
    async fn render_png(&self, _dot: &str) -> flowmap_flowchart::Result<Vec<u8>> {
        Ok(FAKE_PNG.to_vec())
    }
}

struct EmptyRenderer;

#[async_trait]
impl PngRenderer for EmptyRenderer {
    async fn render_png(&self, _dot: &str) -> flowmap_flowchart::Result<Vec<u8>> {
        Ok(Vec::new())
    }
}

fn app() -> Router {
    app_with(Arc::new(StubSummarizer), Arc::new(StubRenderer), &[])
}

fn app_with(
    summarizer: Arc<dyn Summarize>,
    renderer: Arc<dyn PngRenderer>,
    origins: &[String],
) -> Router {
    build_router(AppState::new(summarizer, renderer), origins)
}

async fn post_analyze(app: Router, code: &str) -> (StatusCode, AnalysisResult) {
    let body = serde_json::json!({ "code": code }).to_string();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let result: AnalysisResult = serde_json::from_slice(&bytes).unwrap();
    (status, result)
}

#[tokio::test]
async fn home_reports_liveness() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "Backend is running on Render 🚀");
}

#[tokio::test]
async fn health_probe() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn analyze_valid_source_succeeds() {
    let (status, result) = post_analyze(app(), "def f(): pass").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.error, None);
    assert_eq!(result.summary, "A function that does nothing.");

    let encoded = result.flowchart_base64.expect("image present");
    let decoded = BASE64.decode(encoded).expect("valid base64");
    assert_eq!(decoded, FAKE_PNG);
}

#[tokio::test]
async fn analyze_invalid_syntax_reports_error() {
    let (status, result) = post_analyze(app(), "def f(:").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.summary, "");
    assert_eq!(result.flowchart_base64, None);

    let error = result.error.expect("error present");
    assert!(error.starts_with("Error: "), "got: {error}");
    assert!(error.contains("Syntax error"), "got: {error}");
}

#[tokio::test]
async fn analyze_empty_source_reports_flowchart_failure() {
    // Empty source yields an empty structure, so no flowchart exists even
    // though the summarizer succeeded.
    let (status, result) = post_analyze(app(), "").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.summary, "");
    assert_eq!(result.flowchart_base64, None);
    assert_eq!(
        result.error.as_deref(),
        Some("Error: Flowchart generation failed.")
    );
}

#[tokio::test]
async fn analyze_empty_render_reports_graphviz_failure() {
    let app = app_with(Arc::new(StubSummarizer), Arc::new(EmptyRenderer), &[]);
    let (status, result) = post_analyze(app, "def f(): pass").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.summary, "");
    assert_eq!(result.flowchart_base64, None);
    assert_eq!(
        result.error.as_deref(),
        Some("Error: Graphviz returned empty output.")
    );
}

#[tokio::test]
async fn analyze_summarizer_failure_discards_everything() {
    let app = app_with(Arc::new(FailingSummarizer), Arc::new(StubRenderer), &[]);
    let (status, result) = post_analyze(app, "def f(): pass").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(result.summary, "");
    assert_eq!(result.flowchart_base64, None);

    let error = result.error.expect("error present");
    assert!(error.contains("429"), "got: {error}");
}

#[tokio::test]
async fn cors_allows_listed_origin() {
    let origins = vec!["https://app.example.com".to_string()];
    let app = app_with(Arc::new(StubSummarizer), Arc::new(StubRenderer), &origins);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://app.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let allow_origin = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .expect("allow-origin header present");
    assert_eq!(allow_origin, "https://app.example.com");
}

#[tokio::test]
async fn cors_rejects_unlisted_origin() {
    let origins = vec!["https://app.example.com".to_string()];
    let app = app_with(Arc::new(StubSummarizer), Arc::new(StubRenderer), &origins);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header(header::ORIGIN, "https://evil.example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn cors_preflight_mirrors_request_method() {
    let origins = vec!["https://app.example.com".to_string()];
    let app = app_with(Arc::new(StubSummarizer), Arc::new(StubRenderer), &origins);

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/analyze")
                .header(header::ORIGIN, "https://app.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .expect("allow-origin"),
        "https://app.example.com"
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .expect("allow-credentials"),
        "true"
    );
    assert_eq!(
        headers
            .get(header::ACCESS_CONTROL_ALLOW_METHODS)
            .expect("allow-methods"),
        "POST"
    );
}
