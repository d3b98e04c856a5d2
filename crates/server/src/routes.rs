use crate::pipeline::{analyze_code, AnalysisOutcome};
use crate::state::AppState;
use axum::extract::State;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

/// Request payload for `/analyze`.
#[derive(Debug, Deserialize)]
pub struct CodePayload {
    pub code: String,
}

/// Response body for `/analyze`. Exactly one of {summary+image, error} is
/// meaningfully populated; the fields stay flat for wire compatibility.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: String,
    pub flowchart_base64: Option<String>,
    pub error: Option<String>,
}

impl AnalysisResult {
    fn success(outcome: AnalysisOutcome) -> Self {
        Self {
            summary: outcome.summary,
            flowchart_base64: Some(BASE64.encode(outcome.png)),
            error: None,
        }
    }

    fn failure(message: &impl std::fmt::Display) -> Self {
        Self {
            summary: String::new(),
            flowchart_base64: None,
            error: Some(format!("Error: {message}")),
        }
    }
}

async fn home() -> Json<Value> {
    Json(json!({ "status": "Backend is running on Render 🚀" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// The analyze endpoint: always HTTP 200, errors as data.
async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<CodePayload>,
) -> Json<AnalysisResult> {
    match analyze_code(&state, &payload.code).await {
        Ok(outcome) => Json(AnalysisResult::success(outcome)),
        Err(err) => {
            log::warn!("Analyze request failed: {err}");
            Json(AnalysisResult::failure(&err))
        }
    }
}

/// CORS for the listed origins, credentials allowed.
///
/// Credentialed responses cannot use a wildcard origin, so the allow-list is
/// explicit and methods/headers mirror the request instead of using `*`.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Assemble the application router.
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
        .route("/analyze", post(analyze))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}
