//! Collaborator traits
//!
//! Object-safe async seams via boxed futures: the orchestrator holds
//! `Arc<dyn Trait>` fields and never knows whether it is talking to a real
//! network adapter or an in-memory fixture. Failures on the optional
//! lookups are data absence, never errors; only the scrape itself can fail
//! an analysis.

use offerlens_core::{
    CommissionData, ProgramRecord, ReputationData, ScrapedProduct, VerifierError,
    VerifierSession,
};
use std::future::Future;
use std::pin::Pin;
use uuid::Uuid;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Fetches and parses one product listing. The only required input.
pub trait ProductSource: Send + Sync {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ScrapedProduct, VerifierError>>;
}

/// Looks up merchant reputation by brand or seller name
pub trait ReputationSource: Send + Sync {
    fn lookup<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<ReputationData>>;
}

/// Looks up affiliate program terms. The orchestrator tries brand first,
/// then category, as an explicit ordered fallback chain.
pub trait CommissionSource: Send + Sync {
    fn by_brand<'a>(&'a self, brand: &'a str) -> BoxFuture<'a, Option<CommissionData>>;
    fn by_category<'a>(&'a self, category: &'a str) -> BoxFuture<'a, Option<CommissionData>>;
}

/// Supplies raw alternative program records for a category, excluding the
/// brand under analysis
pub trait CandidateSource: Send + Sync {
    fn load<'a>(
        &'a self,
        category: Option<&'a str>,
        exclude_brand: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ProgramRecord>, VerifierError>>;
}

/// Persists session aggregates keyed by session id
pub trait SessionStore: Send + Sync {
    fn put<'a>(&'a self, session: &'a VerifierSession) -> BoxFuture<'a, ()>;
    fn get<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Option<VerifierSession>>;
}

/// Await attempts in order, short-circuiting on the first `Some`. The async
/// counterpart of `offerlens_core::fallback::first_some`.
pub async fn first_resolved<T>(attempts: Vec<BoxFuture<'_, Option<T>>>) -> Option<T> {
    for attempt in attempts {
        if let Some(value) = attempt.await {
            return Some(value);
        }
    }
    None
}
