//! The alternatives ranker
//!
//! Composite = weighted pillar sum, with a small category-relative
//! commission adjustment when stats are supplied. Hard-stopped candidates
//! stay in the list with a warning but are never winner-eligible.

use crate::weights::RankWeights;
use offerlens_core::{CategoryBenchmarks, RankMode, RankedAlternative, RankerCandidate};
use std::collections::HashSet;

/// Composite bonus/penalty when the candidate's commission rate stands out
/// against the category average
const COMMISSION_STANDOUT_BONUS: f64 = 2.0;
const COMMISSION_STANDOUT_HIGH: f64 = 1.5;
const COMMISSION_STANDOUT_LOW: f64 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub struct RankOutcome {
    pub ranked: Vec<RankedAlternative>,
    pub winner: Option<RankedAlternative>,
}

fn composite_score(
    candidate: &RankerCandidate,
    weights: &RankWeights,
    stats: Option<&CategoryBenchmarks>,
) -> f64 {
    let mut composite = weights.composite(candidate);

    if let Some(stats) = stats {
        if stats.avg_commission_rate > 0.0 {
            let ratio = candidate.commission_rate / stats.avg_commission_rate;
            if ratio >= COMMISSION_STANDOUT_HIGH {
                composite += COMMISSION_STANDOUT_BONUS;
            } else if ratio < COMMISSION_STANDOUT_LOW {
                composite -= COMMISSION_STANDOUT_BONUS;
            }
        }
    }

    composite
}

/// Rank a candidate set with an explicit weight table.
///
/// Deterministic total order: composite desc, confidence desc, coverage
/// desc, risk asc, id asc. Duplicate ids are dropped, first occurrence
/// wins.
pub fn rank_with_weights(
    candidates: &[RankerCandidate],
    weights: &RankWeights,
    stats: Option<&CategoryBenchmarks>,
) -> RankOutcome {
    let mut seen = HashSet::new();
    let mut ranked: Vec<RankedAlternative> = candidates
        .iter()
        .filter(|c| seen.insert(c.id.clone()))
        .map(|candidate| {
            let winner_eligible = candidate.hard_stops.is_empty();
            let warning = (!winner_eligible).then(|| {
                let reasons: Vec<String> =
                    candidate.hard_stops.iter().map(|s| s.to_string()).collect();
                format!("excluded from winner: {}", reasons.join("; "))
            });
            RankedAlternative {
                composite: composite_score(candidate, weights, stats),
                candidate: candidate.clone(),
                rank: 0,
                winner_eligible,
                warning,
            }
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.composite
            .total_cmp(&a.composite)
            .then_with(|| b.candidate.confidence.cmp(&a.candidate.confidence))
            .then_with(|| b.candidate.coverage.total_cmp(&a.candidate.coverage))
            .then_with(|| a.candidate.risk_score.total_cmp(&b.candidate.risk_score))
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });

    for (index, alternative) in ranked.iter_mut().enumerate() {
        alternative.rank = index + 1;
    }

    let winner = ranked.iter().find(|a| a.winner_eligible).cloned();
    RankOutcome { ranked, winner }
}

/// Rank with the default weight table for `mode`
pub fn rank(
    candidates: &[RankerCandidate],
    mode: RankMode,
    stats: Option<&CategoryBenchmarks>,
) -> RankOutcome {
    rank_with_weights(candidates, &RankWeights::for_mode(mode), stats)
}

/// Re-rank an already-scored candidate list under a different mode.
///
/// Identical computation to `rank`: pure, side-effect-free, no I/O. This is
/// what makes instant mode switching possible.
pub fn rerank_with_mode(
    candidates: &[RankerCandidate],
    mode: RankMode,
    stats: Option<&CategoryBenchmarks>,
) -> RankOutcome {
    rank(candidates, mode, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerlens_core::{ConfidenceLevel, HardStop, PriceBand};

    pub(crate) fn candidate(id: &str, viability: f64, merchant: f64, economics: f64) -> RankerCandidate {
        RankerCandidate {
            id: id.to_string(),
            program_name: format!("Program {}", id),
            network: None,
            brand: None,
            viability,
            offer_merchant: merchant,
            economics,
            commission_rate: 0.08,
            cookie_days: Some(30),
            conversion_rate: Some(0.02),
            avg_order_value: Some(50.0),
            refund_rate: Some(0.05),
            coverage: 70.0,
            confidence: ConfidenceLevel::Med,
            hard_stops: vec![],
            risk_score: 0.3,
            trend_score: None,
            price_band: PriceBand::Mid,
        }
    }

    #[test]
    fn test_mode_changes_the_order() {
        let pool = vec![
            candidate("demand", 95.0, 50.0, 50.0),
            candidate("trust", 50.0, 95.0, 50.0),
            candidate("margin", 50.0, 50.0, 95.0),
        ];

        let demand = rank(&pool, RankMode::DemandFirst, None);
        assert_eq!(demand.ranked[0].candidate.id, "demand");

        let trust = rank(&pool, RankMode::TrustFirst, None);
        assert_eq!(trust.ranked[0].candidate.id, "trust");

        let margin = rank(&pool, RankMode::EconomicsFirst, None);
        assert_eq!(margin.ranked[0].candidate.id, "margin");
    }

    #[test]
    fn test_hard_stopped_candidate_never_wins() {
        let mut best = candidate("best", 99.0, 99.0, 99.0);
        best.hard_stops = vec![HardStop::MerchantTrustCritical];
        let pool = vec![best, candidate("solid", 70.0, 70.0, 70.0)];

        let outcome = rank(&pool, RankMode::Standard, None);
        // Numerically highest, still ranked first, but not the winner
        assert_eq!(outcome.ranked[0].candidate.id, "best");
        assert!(!outcome.ranked[0].winner_eligible);
        assert!(outcome.ranked[0].warning.as_deref().unwrap().contains("merchant"));
        assert_eq!(outcome.winner.as_ref().unwrap().candidate.id, "solid");
    }

    #[test]
    fn test_no_eligible_candidates_means_no_winner() {
        let mut only = candidate("only", 80.0, 80.0, 80.0);
        only.hard_stops = vec![HardStop::ProgramPaused];
        let outcome = rank(&[only], RankMode::Standard, None);
        assert!(outcome.winner.is_none());
        assert_eq!(outcome.ranked.len(), 1);
    }

    #[test]
    fn test_tie_break_chain() {
        // Same composite everywhere; the chain decides
        let mut a = candidate("a", 70.0, 70.0, 70.0);
        let mut b = candidate("b", 70.0, 70.0, 70.0);
        let mut c = candidate("c", 70.0, 70.0, 70.0);

        b.confidence = ConfidenceLevel::High;
        c.confidence = ConfidenceLevel::High;
        c.coverage = 90.0;

        let outcome = rank(&[a.clone(), b.clone(), c.clone()], RankMode::Standard, None);
        assert_eq!(outcome.ranked[0].candidate.id, "c"); // higher coverage
        assert_eq!(outcome.ranked[1].candidate.id, "b"); // higher confidence
        assert_eq!(outcome.ranked[2].candidate.id, "a");

        // Fully identical except risk
        a.confidence = ConfidenceLevel::High;
        a.coverage = 90.0;
        b.coverage = 90.0;
        a.risk_score = 0.1;
        let outcome = rank(&[b, c, a], RankMode::Standard, None);
        assert_eq!(outcome.ranked[0].candidate.id, "a"); // lowest risk
    }

    #[test]
    fn test_duplicate_ids_first_occurrence_wins() {
        let first = candidate("dup", 80.0, 80.0, 80.0);
        let second = candidate("dup", 20.0, 20.0, 20.0);
        let outcome = rank(&[first, second], RankMode::Standard, None);
        assert_eq!(outcome.ranked.len(), 1);
        assert!(outcome.ranked[0].composite > 50.0);
    }

    #[test]
    fn test_rerank_is_identical_to_rank() {
        let pool = vec![
            candidate("a", 60.0, 70.0, 80.0),
            candidate("b", 80.0, 60.0, 70.0),
            candidate("c", 70.0, 80.0, 60.0),
        ];
        for mode in [
            RankMode::Standard,
            RankMode::DemandFirst,
            RankMode::TrustFirst,
            RankMode::EconomicsFirst,
        ] {
            let a = rank(&pool, mode, None);
            let b = rerank_with_mode(&pool, mode, None);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_commission_standout_adjustment() {
        let stats = CategoryBenchmarks {
            category: "general".to_string(),
            avg_commission_rate: 0.04,
            avg_cookie_days: 30.0,
            avg_conversion_rate: 0.02,
            avg_order_value: 55.0,
            avg_refund_rate: 0.08,
            avg_review_count: 180.0,
            avg_price: 45.0,
        };
        let c = candidate("a", 70.0, 70.0, 70.0); // 0.08 rate = 2x the average
        let with_stats = rank(&[c.clone()], RankMode::Standard, Some(&stats));
        let without = rank(&[c], RankMode::Standard, None);
        assert!(
            (with_stats.ranked[0].composite - without.ranked[0].composite - 2.0).abs() < 1e-9
        );
    }
}
