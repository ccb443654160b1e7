// Axum API Server Module
//
// Purpose: REST API exposing the farm risk scorer
// Endpoints: GET /health, POST /predict, POST /predict/batch

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServiceConfig;
use crate::scorer::{RiskScorer, ScoreResult};
use crate::utils::RawPayload;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub scorer: Arc<RiskScorer>,
}

impl AppState {
    /// Load model, feature order and policy per configuration
    pub fn new(config: &ServiceConfig) -> anyhow::Result<Self> {
        let scorer = RiskScorer::load(config)?;
        Ok(Self::from_scorer(scorer))
    }

    pub fn from_scorer(scorer: RiskScorer) -> Self {
        Self {
            scorer: Arc::new(scorer),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Scoring endpoints
        .route("/predict", post(predict))
        .route("/predict/batch", post(predict_batch))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "model": state.scorer.model_name(),
    }))
}

/// Score one farm
async fn predict(
    State(state): State<AppState>,
    Json(payload): Json<RawPayload>,
) -> Result<Json<ScoreResult>, AppError> {
    let scorer = state.scorer.clone();

    // CPU-bound work: run in blocking thread pool
    let result = tokio::task::spawn_blocking(move || scorer.score(&payload))
        .await
        .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?
        .map_err(|e| {
            tracing::warn!("Scoring failed: {}", e);
            AppError::Scoring(e.to_string())
        })?;

    tracing::info!(
        "Scored farm: {} ({})",
        result.risk_score,
        result.risk_level.as_str()
    );

    Ok(Json(result))
}

/// Per-payload outcome in a batch response
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum BatchEntry {
    Ok(ScoreResult),
    Error(String),
}

/// Score many farms in one request
async fn predict_batch(
    State(state): State<AppState>,
    Json(payloads): Json<Vec<RawPayload>>,
) -> Result<Json<Vec<BatchEntry>>, AppError> {
    let scorer = state.scorer.clone();
    let batch_size = payloads.len();

    tracing::info!("Scoring batch of {} farms", batch_size);

    let entries = tokio::task::spawn_blocking(move || {
        scorer
            .score_batch(&payloads)
            .into_iter()
            .map(|r| match r {
                Ok(result) => BatchEntry::Ok(result),
                Err(e) => BatchEntry::Error(e.to_string()),
            })
            .collect::<Vec<_>>()
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    Ok(Json(entries))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
enum AppError {
    Scoring(String),
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Scoring(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
