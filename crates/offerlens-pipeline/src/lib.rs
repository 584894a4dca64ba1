//! OfferLens Pipeline: the orchestrator and its collaborator seams
//!
//! Every external dependency (scraper, reputation lookup, commission
//! lookup, candidate loader, playbook generator, session store) sits
//! behind a constructor-injected trait, so the pure stages can be tested
//! against in-memory collaborators with no network anywhere.
//!
//! # Pipeline Flow
//!
//! ```text
//! URL → scrape ──┬─ reputation ─┐
//!                └─ commission ─┴→ score → confidence → coverage
//!                                   → verdict → route → rank → bucket
//! ```
//!
//! `rerank` re-enters at the ranking stage over the session's cached
//! candidate pool; it never re-triggers I/O.

pub mod collaborators;
pub mod memory;
pub mod orchestrator;
pub mod playbook;

pub use collaborators::{
    first_resolved, BoxFuture, CandidateSource, CommissionSource, ProductSource,
    ReputationSource, SessionStore,
};
pub use memory::{
    InMemorySessionStore, OutlinePlaybook, StaticCandidateSource, StaticCommissionSource,
    StaticProductSource, StaticReputationSource,
};
pub use orchestrator::Orchestrator;
pub use playbook::{Playbook, PlaybookGenerator, PlaybookInput, PlaybookResponse, PlaybookStep, PlaybookSubject};
