//! Bucketizer: partition the ranked list into a Winner plus named groups
//!
//! A candidate matching several bucket rules goes to the first match in
//! the fixed priority order Safe > Upside > Budget > Trending, which is
//! what guarantees the partition invariant.

use crate::ranker::RankOutcome;
use offerlens_core::{
    Bucket, BucketKind, BucketStrategy, DecisionSet, PriceBand, RankedAlternative,
};

/// Risk below this is Safe under the balanced strategy
const SAFE_RISK_CEILING: f64 = 0.25;
/// Conservative strategy tightens the Safe ceiling
const SAFE_RISK_CEILING_CONSERVATIVE: f64 = 0.20;
/// Composite at or above this qualifies for Upside
const UPSIDE_COMPOSITE_FLOOR: f64 = 70.0;
/// Risk above this disqualifies even budget picks
const BUDGET_RISK_CEILING: f64 = 0.6;
/// Trend score at or above this qualifies for Trending
const TREND_FLOOR: f64 = 0.6;

#[derive(Debug, Clone)]
pub struct BucketConfig {
    pub items_per_bucket: usize,
    pub show_trending: bool,
    pub strategy: BucketStrategy,
}

impl Default for BucketConfig {
    fn default() -> Self {
        Self {
            items_per_bucket: 3,
            show_trending: true,
            strategy: BucketStrategy::Balanced,
        }
    }
}

fn matching_bucket(
    alternative: &RankedAlternative,
    config: &BucketConfig,
) -> Option<BucketKind> {
    let safe_ceiling = match config.strategy {
        BucketStrategy::Balanced => SAFE_RISK_CEILING,
        BucketStrategy::Conservative => SAFE_RISK_CEILING_CONSERVATIVE,
    };
    let candidate = &alternative.candidate;

    if alternative.winner_eligible && candidate.risk_score < safe_ceiling {
        Some(BucketKind::Safe)
    } else if alternative.composite >= UPSIDE_COMPOSITE_FLOOR {
        Some(BucketKind::Upside)
    } else if candidate.price_band == PriceBand::Budget
        && candidate.risk_score <= BUDGET_RISK_CEILING
    {
        Some(BucketKind::Budget)
    } else if config.show_trending && candidate.trend_score.unwrap_or(0.0) >= TREND_FLOOR {
        Some(BucketKind::Trending)
    } else {
        None
    }
}

/// Partition the ranked alternatives. The Winner is the top-ranked eligible
/// candidate and never appears in any bucket.
pub fn bucketize(outcome: &RankOutcome, config: &BucketConfig) -> DecisionSet {
    let winner = outcome.winner.clone();
    let winner_id = winner.as_ref().map(|w| w.candidate.id.clone());

    let mut safe = Vec::new();
    let mut upside = Vec::new();
    let mut budget = Vec::new();
    let mut trending = Vec::new();

    for alternative in &outcome.ranked {
        if Some(&alternative.candidate.id) == winner_id.as_ref() {
            continue;
        }
        let target = match matching_bucket(alternative, config) {
            Some(BucketKind::Safe) => &mut safe,
            Some(BucketKind::Upside) => &mut upside,
            Some(BucketKind::Budget) => &mut budget,
            Some(BucketKind::Trending) => &mut trending,
            None => continue,
        };
        if target.len() < config.items_per_bucket {
            target.push(alternative.clone());
        }
    }

    let buckets = [
        (BucketKind::Safe, safe),
        (BucketKind::Upside, upside),
        (BucketKind::Budget, budget),
        (BucketKind::Trending, trending),
    ]
    .into_iter()
    .filter(|(_, items)| !items.is_empty())
    .map(|(kind, items)| Bucket { kind, items })
    .collect();

    DecisionSet {
        winner,
        buckets,
        total_candidates: outcome.ranked.len(),
    }
}
