//! Intent routing: map the verdict to a ranking mode and bucket strategy
//!
//! This is the single seam that lets "find me something safer / more
//! profitable" actions re-rank cheaply: the router only picks a mode, it
//! never recomputes scores.

use offerlens_core::{
    BucketStrategy, ConfidenceLevel, RankMode, RoutingDecision, ScoreResult, VerdictResult,
    VerdictStatus,
};

/// Economics pillar at or above this routes GREEN verdicts to
/// economics-first ranking
const ECONOMICS_FIRST_FLOOR: f64 = 70.0;
/// Coverage below this forces conservative standard weighting
const LOW_COVERAGE_CEILING: f64 = 40.0;

/// Derive the ranking mode and bucket strategy. An explicit user override
/// takes precedence over all derived logic; trending stays suppressed for
/// RED and TEST_FIRST verdicts even then.
pub fn route(
    verdict: &VerdictResult,
    scores: &ScoreResult,
    confidence: ConfidenceLevel,
    coverage_score: f64,
    user_override: Option<RankMode>,
) -> RoutingDecision {
    let guarded = matches!(
        verdict.status,
        VerdictStatus::Red | VerdictStatus::TestFirst
    );

    if let Some(mode) = user_override {
        return RoutingDecision {
            mode,
            show_trending: !guarded,
            strategy: if guarded {
                BucketStrategy::Conservative
            } else {
                BucketStrategy::Balanced
            },
        };
    }

    let decision = if guarded {
        // Safety over margin when the base product already failed
        RoutingDecision {
            mode: RankMode::TrustFirst,
            show_trending: false,
            strategy: BucketStrategy::Conservative,
        }
    } else if coverage_score < LOW_COVERAGE_CEILING {
        // Aggressive weighting is unjustified on thin evidence
        RoutingDecision {
            mode: RankMode::Standard,
            show_trending: true,
            strategy: BucketStrategy::Balanced,
        }
    } else if verdict.status == VerdictStatus::Green && scores.economics >= ECONOMICS_FIRST_FLOOR {
        RoutingDecision {
            mode: RankMode::EconomicsFirst,
            show_trending: true,
            strategy: BucketStrategy::Balanced,
        }
    } else {
        RoutingDecision {
            mode: RankMode::Standard,
            show_trending: true,
            strategy: BucketStrategy::Balanced,
        }
    };

    tracing::debug!(mode = %decision.mode, %confidence, coverage_score, "routing decision");
    decision
}
