use std::sync::atomic::Ordering;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use chrono::Utc;
use tracing::{debug, info};

use apiscan_core::analyze;
use apiscan_core::report::model::AnalysisResult;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::models::{AnalyzeRequest, HealthResponse, StatsResponse};

/// Path reported for snippets submitted over HTTP.
pub const SUBMITTED_PATH: &str = "input.go";

pub const SERVICE_NAME: &str = "API Performance Analyzer";

const SUPPORTED_LANGUAGES: &[&str] = &["go", "gin", "echo"];

const FEATURES: &[&str] = &[
    "N+1 Query Detection",
    "Missing Index Analysis",
    "Large Payload Detection",
    "Caching Opportunities",
    "Security Analysis",
    "Performance Scoring",
];

/// POST /api/v1/analyze
pub async fn analyze_code(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> ApiResult<Json<AnalysisResult>> {
    let Json(request) =
        payload.map_err(|e| ApiError::BadRequest(format!("Invalid request: {}", e.body_text())))?;

    if request.code.trim().is_empty() {
        return Err(ApiError::BadRequest("Code cannot be empty".to_string()));
    }

    debug!(bytes = request.code.len(), dialect = %request.dialect, "analyzing submission");

    // Parsing is CPU-bound.
    let result = tokio::task::spawn_blocking(move || {
        analyze(&request.code, &request.dialect, SUBMITTED_PATH)
    })
    .await
    .map_err(|e| ApiError::Internal(e.to_string()))?;

    let total = state.analyses.fetch_add(1, Ordering::Relaxed) + 1;
    info!(
        total,
        score = result.quality_score(),
        issues = result.issue_count(),
        "analysis served"
    );

    Ok(Json(result))
}

/// GET /api/v1/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/v1/stats
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        total_analyses: state.analyses.load(Ordering::Relaxed),
        supported_languages: SUPPORTED_LANGUAGES.iter().map(|s| s.to_string()).collect(),
        features: FEATURES.iter().map(|s| s.to_string()).collect(),
    })
}
