/// HTTP surface for the research agent
/// Routes, request/response types and handlers shared by the `research-http` binary and tests
/// Every request runs its own pipeline with its own run context

use std::sync::Arc;

use axum::{
    extract::Json,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;

use crate::context::StepRecord;
use crate::models::{Depth, ResearchReport};
use crate::orchestration::{ResearchAgent, ResearchRequest};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Research request from a client
#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchHttpRequest {
    pub query: String,
    #[serde(default)]
    pub depth: Depth,
    #[serde(default)]
    pub time_limit: Option<u64>,
}

/// Research response to a client
#[derive(Debug, Serialize, Deserialize)]
pub struct ResearchHttpResponse {
    pub success: bool,
    pub run_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<ResearchReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub steps: Option<Vec<StepRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// `GET /health` and `POST /research`, with permissive CORS
pub fn router(agent: Arc<ResearchAgent>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/research", post(research))
        .layer(CorsLayer::permissive())
        .layer(Extension(agent))
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Run one research pipeline
async fn research(
    Extension(agent): Extension<Arc<ResearchAgent>>,
    Json(payload): Json<ResearchHttpRequest>,
) -> impl IntoResponse {
    let run_id = format!("run_{}", uuid::Uuid::new_v4());
    tracing::info!(
        "[RESEARCH] Incoming request - RunID: {}, Query length: {}",
        run_id,
        payload.query.len()
    );

    let request = ResearchRequest::new(payload.query)
        .with_depth(payload.depth)
        .with_time_limit(payload.time_limit);

    match agent.conduct_research(&request).await {
        Ok(run) => {
            tracing::info!(
                "[SUCCESS] Run {} finished in {:.2}s - documents: {}, findings: {}",
                run_id,
                run.elapsed.as_secs_f64(),
                run.report.metadata.document_count,
                run.report.metadata.finding_count
            );
            (
                StatusCode::OK,
                Json(ResearchHttpResponse {
                    success: true,
                    run_id,
                    steps: Some(run.context.steps().to_vec()),
                    report: Some(run.report),
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::warn!("[ERROR] Run {} rejected: {:#}", run_id, e);
            (
                StatusCode::BAD_REQUEST,
                Json(ResearchHttpResponse {
                    success: false,
                    run_id,
                    report: None,
                    steps: None,
                    error: Some(format!("Error processing request: {:#}", e)),
                }),
            )
        }
    }
}
