//! Binary entrypoint for the OfferLens API server.
//!
//! Wires the orchestrator to the in-memory reference collaborators;
//! deployments replace them with real scraper/reputation/commission
//! adapters through `AppState`.
use offerlens_api::{run, AppState};
use offerlens_pipeline::{
    InMemorySessionStore, Orchestrator, OutlinePlaybook, StaticCandidateSource,
    StaticCommissionSource, StaticProductSource, StaticReputationSource,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let orchestrator = Orchestrator::new(
        Arc::new(StaticProductSource::new()),
        Arc::new(StaticReputationSource::new()),
        Arc::new(StaticCommissionSource::new()),
        Arc::new(StaticCandidateSource::new()),
        Arc::new(OutlinePlaybook),
        Arc::new(InMemorySessionStore::new()),
    );
    let state = AppState::new(Arc::new(orchestrator));

    // Default listen address can be overridden with OFFERLENS_ADDR
    let addr = std::env::var("OFFERLENS_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    run(&addr, state).await;
}
