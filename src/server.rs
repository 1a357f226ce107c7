//! HTTP surface for the orchestration layer
//!
//! Exposes the three capabilities over an `axum` router: `/api/chat`,
//! `/api/analyze`, `/api/generate`, plus `/api/models` and `/health`.
//!
//! Every request follows the same lifecycle: parse the input, run the local
//! composition, await exactly one outbound provider call, respond. There is
//! no queueing, batching, or request cancellation.
//!
//! Error mapping: data-read failures are the caller's problem (400), missing
//! credentials make the whole service unavailable (503, checked once at
//! startup), everything else is a 500. Raw errors never escape as a crash;
//! a failed request never terminates the process.

use crate::analyst;
use crate::config::Config;
use crate::error::FreyError;
use crate::gateway::Gateway;
use crate::prompts::Tone;
use crate::providers::Turn;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Shared state behind the router
///
/// `gateway` is `None` when the server was started without credentials; in
/// that state every capability endpoint answers 503 without attempting an
/// outbound call.
#[derive(Clone)]
pub struct AppState {
    gateway: Option<Arc<Gateway>>,
}

impl AppState {
    pub fn new(gateway: Option<Arc<Gateway>>) -> Self {
        Self { gateway }
    }

    fn gateway(&self) -> Result<&Arc<Gateway>, ApiError> {
        self.gateway.as_ref().ok_or_else(|| {
            ApiError::from_error(
                &FreyError::MissingCredentials(
                    "generation service credentials are not configured".to_string(),
                )
                .into(),
            )
        })
    }
}

/// Error payload returned to HTTP callers
///
/// Carries the status class already resolved; the JSON body is always
/// `{"success": false, "error": "..."}`.
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Classify an orchestration error into its HTTP status
    fn from_error(err: &anyhow::Error) -> Self {
        let status = match err.downcast_ref::<FreyError>() {
            Some(e) if e.is_data_read() => StatusCode::BAD_REQUEST,
            Some(FreyError::MissingCredentials(_)) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        tracing::warn!(status = %self.status, "Request failed: {}", self.message);
        let body = Json(json!({
            "success": false,
            "error": self.message,
        }));
        (self.status, body).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub user_prompt: String,
    /// Prior turns; the surface is stateless so callers carry the history
    #[serde(default)]
    pub history: Vec<Turn>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub success: bool,
    pub response: String,
    pub history: Vec<Turn>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub data_input: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub summary: String,
    pub analysis: String,
}

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub subject: String,
    pub tone: Tone,
}

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub content: String,
}

/// Build the application router
pub fn router(state: AppState, config: &Config) -> Router {
    let cors = cors_layer(&config.server.allowed_origins);

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/analyze", post(analyze))
        .route("/api/generate", post(generate))
        .route("/api/models", get(models))
        .route("/health", get(health))
        .layer(cors)
        .with_state(state)
}

/// CORS policy from the configured origins; permissive when none are set
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    if allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(parse_origins(allowed_origins)))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

/// Parse configured origins into header values, warning on each one that
/// cannot be used so a misconfigured allowlist is visible in the logs
fn parse_origins(allowed_origins: &[String]) -> Vec<HeaderValue> {
    allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect()
}

/// Bind and serve until the process is stopped
///
/// # Errors
///
/// Returns error if the listen address cannot be bound.
pub async fn serve(state: AppState, config: &Config) -> crate::error::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = router(state, config);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let gateway = state.gateway()?;
    let mut session = gateway.resume_chat(request.history);
    let outcome = session
        .send(&request.user_prompt)
        .await
        .map_err(|e| ApiError::from_error(&e))?;
    Ok(Json(ChatResponse {
        success: true,
        response: outcome.into_text(),
        history: session.history().to_vec(),
    }))
}

async fn analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let gateway = state.gateway()?;
    let report = analyst::summarize_str(&request.data_input)
        .map_err(|e| ApiError::from_error(&e))?;
    let summary = report.to_string();
    let analysis = gateway
        .narrate_analysis(&summary)
        .await
        .map_err(|e| ApiError::from_error(&e))?;
    Ok(Json(AnalyzeResponse {
        success: true,
        summary,
        analysis,
    }))
}

async fn generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let gateway = state.gateway()?;
    let content = gateway
        .generate_content(&request.subject, request.tone)
        .await
        .map_err(|e| ApiError::from_error(&e))?;
    Ok(Json(GenerateResponse {
        success: true,
        content,
    }))
}

async fn models(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let gateway = state.gateway()?;
    let models = gateway
        .provider()
        .list_models()
        .await
        .map_err(|e| ApiError::from_error(&e))?;
    Ok(Json(json!({ "success": true, "models": models })))
}
