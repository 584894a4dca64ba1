//! OfferLens API /v1: REST endpoints over the pipeline
//!
//! The router owns no evaluation logic; every handler is a thin
//! translation between HTTP and the injected `Orchestrator`.

pub mod handlers;
pub mod metrics;
pub mod middleware;

use axum::{
    routing::{get, post},
    Router,
};
use metrics::ApiMetrics;
use offerlens_pipeline::Orchestrator;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Shared handler state: the pipeline front door plus API counters
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub metrics: Arc<ApiMetrics>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            metrics: Arc::new(ApiMetrics::new()),
        }
    }
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/v1/analyze", post(handlers::analyze))
        .route("/v1/rerank", post(handlers::rerank))
        .route("/v1/playbook", post(handlers::build_playbook))
        .route("/v1/watchlist", post(handlers::add_to_watchlist))
        .route("/v1/sessions/{id}", get(handlers::get_session))
        .route("/v1/health", get(handlers::health))
        .route("/v1/metrics", get(handlers::metrics_text))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::cors())
        .with_state(state)
}

pub async fn run(addr: &str, state: AppState) {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind");

    tracing::info!("OfferLens API listening on {}", addr);
    axum::serve(listener, app).await.expect("Server error");
}
