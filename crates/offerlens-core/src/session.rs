//! Session aggregate, lifecycle state machine, and the pipeline's
//! input/output contracts
//!
//! Field names and nesting of `AnalyzeResponse` are normative for any
//! consuming UI.

use crate::economics::{EarningBand, SensitivityReport};
use crate::error::VerifierError;
use crate::ident::canonical_key;
use crate::product::ScrapedProduct;
use crate::ranking::{Bucket, RankMode, RankedAlternative, RankerCandidate, RoutingDecision};
use crate::score::{ConfidenceResult, CoverageResult, PillarBreakdown, PillarTotals};
use crate::verdict::VerdictResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Analyzing,
    RecommendationsReady,
    PlaybookReady,
    Completed,
    Failed,
}

impl SessionStatus {
    /// Legal lifecycle moves. `rerank` is not a transition: it stays within
    /// RecommendationsReady / PlaybookReady.
    pub fn can_transition(self, to: SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, to),
            (Analyzing, RecommendationsReady)
                | (Analyzing, Failed)
                | (RecommendationsReady, PlaybookReady)
                | (RecommendationsReady, Completed)
                | (RecommendationsReady, Failed)
                | (PlaybookReady, Completed)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, SessionStatus::Completed | SessionStatus::Failed)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionStatus::Analyzing => write!(f, "analyzing"),
            SessionStatus::RecommendationsReady => write!(f, "recommendations_ready"),
            SessionStatus::PlaybookReady => write!(f, "playbook_ready"),
            SessionStatus::Completed => write!(f, "completed"),
            SessionStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Caller-supplied context for one analysis
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserContext {
    /// Categories the user already promotes in
    #[serde(default)]
    pub affinity_categories: Vec<String>,
    /// Caller's own traffic estimate, overriding the default click range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_clicks: Option<u32>,
    /// Explicit ranking mode override; wins over all derived routing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_mode: Option<RankMode>,
}

/// Pros, risks, and assumptions surfaced alongside the verdict
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Insights {
    pub top_pros: Vec<String>,
    pub top_risks: Vec<String>,
    pub key_assumptions: Vec<String>,
}

/// Earnings band plus sensitivity scenarios
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsSection {
    pub earning_band: EarningBand,
    pub sensitivity: SensitivityReport,
}

/// Everything stages 1-5 computed for the original product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub product: ScrapedProduct,
    pub scores: PillarTotals,
    pub score_breakdowns: Vec<PillarBreakdown>,
    pub confidence: ConfidenceResult,
    pub verdict: VerdictResult,
    pub insights: Insights,
    pub economics: EconomicsSection,
    pub coverage: CoverageResult,
}

/// Ranking output for the current mode
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendations {
    pub mode: RankMode,
    pub routing: RoutingDecision,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<RankedAlternative>,
    pub buckets: Vec<Bucket>,
    pub total_candidates: usize,
    pub can_rerank: bool,
}

/// The persisted session aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifierSession {
    pub id: Uuid,
    pub original_url: String,
    pub normalized_url: String,
    pub canonical_key: String,
    pub user: UserContext,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<AnalysisSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Recommendations>,
    /// Scored candidate pool cached for rerank; never re-fetched
    #[serde(default)]
    pub candidate_pool: Vec<RankerCandidate>,
}

impl VerifierSession {
    pub fn new(original_url: &str, normalized_url: &str, user: UserContext) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            original_url: original_url.to_string(),
            normalized_url: normalized_url.to_string(),
            canonical_key: canonical_key(normalized_url),
            user,
            status: SessionStatus::Analyzing,
            created_at: now,
            updated_at: now,
            snapshot: None,
            recommendations: None,
            candidate_pool: Vec::new(),
        }
    }

    /// Move to `to`, rejecting anything the lifecycle does not allow
    pub fn transition(&mut self, to: SessionStatus) -> Result<(), VerifierError> {
        if !self.status.can_transition(to) {
            return Err(VerifierError::InvalidTransition {
                from: self.status,
                to,
            });
        }
        tracing::debug!(session = %self.id, from = %self.status, to = %to, "session transition");
        self.status = to;
        self.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// API contracts
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalyzeRequest {
    pub url: String,
    #[serde(default)]
    pub user: UserContext,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub snapshot: AnalysisSnapshot,
    pub recommendations: Recommendations,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RerankRequest {
    pub session_id: Uuid,
    pub mode: RankMode,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RerankResponse {
    pub mode: RankMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<RankedAlternative>,
    pub buckets: Vec<Bucket>,
    pub total_candidates: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybookRequest {
    pub session_id: Uuid,
    /// Build the plan for this ranked alternative instead of the original
    /// product
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternative_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WatchlistRequest {
    pub session_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> VerifierSession {
        VerifierSession::new(
            "https://shop.example.com/p/1?utm_source=x",
            "https://shop.example.com/p/1",
            UserContext::default(),
        )
    }

    #[test]
    fn test_happy_path_transitions() {
        let mut s = session();
        assert_eq!(s.status, SessionStatus::Analyzing);
        s.transition(SessionStatus::RecommendationsReady).unwrap();
        s.transition(SessionStatus::PlaybookReady).unwrap();
        s.transition(SessionStatus::Completed).unwrap();
        assert!(s.status.is_terminal());
    }

    #[test]
    fn test_watchlist_skips_playbook() {
        let mut s = session();
        s.transition(SessionStatus::RecommendationsReady).unwrap();
        s.transition(SessionStatus::Completed).unwrap();
    }

    #[test]
    fn test_failed_is_reachable_from_early_states_only() {
        let mut s = session();
        s.transition(SessionStatus::Failed).unwrap();

        let mut s = session();
        s.transition(SessionStatus::RecommendationsReady).unwrap();
        s.transition(SessionStatus::PlaybookReady).unwrap();
        assert!(s.transition(SessionStatus::Failed).is_err());
    }

    #[test]
    fn test_illegal_transitions_rejected() {
        let mut s = session();
        assert!(s.transition(SessionStatus::PlaybookReady).is_err());
        assert!(s.transition(SessionStatus::Completed).is_err());

        let mut s = session();
        s.transition(SessionStatus::Failed).unwrap();
        assert!(s.transition(SessionStatus::RecommendationsReady).is_err());
    }

    #[test]
    fn test_canonical_key_assigned_at_creation() {
        let s = session();
        assert!(s.canonical_key.starts_with("blake3:"));
    }
}
