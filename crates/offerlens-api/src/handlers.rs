//! API Handlers
//!
//! Error mapping follows the taxonomy in `offerlens_core::error`:
//! validation 400, unknown session 404, illegal lifecycle moves 409,
//! failed scrape 502.

use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use offerlens_core::{
    AnalyzeRequest, AnalyzeResponse, PlaybookRequest, RerankRequest, RerankResponse,
    VerifierError, VerifierSession, WatchlistRequest, ENGINE_VERSION,
};
use offerlens_pipeline::PlaybookResponse;
use serde_json::{json, Value};
use uuid::Uuid;

type ApiError = (StatusCode, Json<Value>);

fn error_response(error: &VerifierError) -> ApiError {
    let status = match error {
        VerifierError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
        VerifierError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        VerifierError::InvalidTransition { .. } | VerifierError::RerankUnavailable(_) => {
            StatusCode::CONFLICT
        }
        VerifierError::ScrapeFailed(_) | VerifierError::CandidateSupply(_) => {
            StatusCode::BAD_GATEWAY
        }
        VerifierError::PlaybookFailed(_) | VerifierError::Serialization(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": error.to_string() })))
}

pub async fn analyze(
    State(state): State<AppState>,
    Json(payload): Json<AnalyzeRequest>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    state.metrics.analyses_total.inc();
    match state.orchestrator.analyze(&payload.url, payload.user).await {
        Ok(response) => Ok(Json(response)),
        Err(error) => {
            state.metrics.analyses_failed.inc();
            Err(error_response(&error))
        }
    }
}

pub async fn rerank(
    State(state): State<AppState>,
    Json(payload): Json<RerankRequest>,
) -> Result<Json<RerankResponse>, ApiError> {
    state.metrics.reranks_total.inc();
    state
        .orchestrator
        .rerank(payload.session_id, payload.mode)
        .await
        .map(Json)
        .map_err(|error| error_response(&error))
}

pub async fn build_playbook(
    State(state): State<AppState>,
    Json(payload): Json<PlaybookRequest>,
) -> Result<Json<PlaybookResponse>, ApiError> {
    state.metrics.playbooks_total.inc();
    state
        .orchestrator
        .build_playbook(payload.session_id, payload.alternative_id.as_deref())
        .await
        .map(Json)
        .map_err(|error| error_response(&error))
}

pub async fn add_to_watchlist(
    State(state): State<AppState>,
    Json(payload): Json<WatchlistRequest>,
) -> Result<Json<Value>, ApiError> {
    let status = state
        .orchestrator
        .archive_to_watchlist(payload.session_id)
        .await
        .map_err(|error| error_response(&error))?;
    Ok(Json(json!({
        "session_id": payload.session_id,
        "status": status,
    })))
}

pub async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<VerifierSession>, ApiError> {
    state
        .orchestrator
        .session(id)
        .await
        .map(Json)
        .map_err(|error| error_response(&error))
}

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": ENGINE_VERSION }))
}

pub async fn metrics_text(State(state): State<AppState>) -> Result<String, ApiError> {
    state.metrics.encode().map_err(|error| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": error.to_string() })),
        )
    })
}
