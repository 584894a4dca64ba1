//! Unified error model
//!
//! Pure computation never errors: scores are clamped and missing evidence
//! takes a neutral default. The fallible seams are URL validation, session
//! lookup and transitions, and collaborator I/O.

use crate::session::SessionStatus;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum VerifierError {
    #[error("URL/{0}")]
    InvalidUrl(String),

    #[error("SESSION/not found: {0}")]
    SessionNotFound(Uuid),

    #[error("SESSION/illegal transition {from} -> {to}")]
    InvalidTransition {
        from: SessionStatus,
        to: SessionStatus,
    },

    #[error("SESSION/rerank unavailable in state {0}")]
    RerankUnavailable(SessionStatus),

    #[error("SCRAPE/{0}")]
    ScrapeFailed(String),

    #[error("CANDIDATES/{0}")]
    CandidateSupply(String),

    #[error("PLAYBOOK/{0}")]
    PlaybookFailed(String),

    #[error("SERIALIZE/{0}")]
    Serialization(String),
}
