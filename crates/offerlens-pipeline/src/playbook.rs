//! Playbook boundary
//!
//! The generator is an external collaborator: this module only defines its
//! input/output contract. Internals of the text generation are out of
//! scope for the pipeline.

use crate::collaborators::BoxFuture;
use offerlens_core::{
    RankerCandidate, ScrapedProduct, SessionStatus, VerifierError,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What the plan is being built for
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybookSubject {
    Product { product: ScrapedProduct },
    Alternative { candidate: RankerCandidate },
}

/// Input contract for the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookInput {
    pub subject: PlaybookSubject,
    pub pros: Vec<String>,
    pub risks: Vec<String>,
    pub assumptions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookStep {
    pub order: u32,
    pub action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Structured action plan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playbook {
    pub title: String,
    pub steps: Vec<PlaybookStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybookResponse {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub playbook: Playbook,
}

/// External playbook generator collaborator
pub trait PlaybookGenerator: Send + Sync {
    fn generate<'a>(&'a self, input: &'a PlaybookInput)
        -> BoxFuture<'a, Result<Playbook, VerifierError>>;
}
