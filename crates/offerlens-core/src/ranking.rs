//! Ranking types: modes, candidates, buckets, and the routing decision

use crate::score::ConfidenceLevel;
use crate::verdict::HardStop;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named weighting profile used to compose a candidate's pillar scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankMode {
    #[default]
    Standard,
    DemandFirst,
    TrustFirst,
    EconomicsFirst,
}

impl fmt::Display for RankMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RankMode::Standard => write!(f, "standard"),
            RankMode::DemandFirst => write!(f, "demand_first"),
            RankMode::TrustFirst => write!(f, "trust_first"),
            RankMode::EconomicsFirst => write!(f, "economics_first"),
        }
    }
}

/// How aggressively the bucketizer admits risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BucketStrategy {
    #[default]
    Balanced,
    Conservative,
}

/// Output of the intent router
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub mode: RankMode,
    pub show_trending: bool,
    pub strategy: BucketStrategy,
}

/// Price positioning relative to the category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PriceBand {
    Budget,
    #[default]
    Mid,
    Premium,
}

/// Brand recognition tier supplied by the candidate loader
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BrandTier {
    Recognized,
    Niche,
    #[default]
    Unknown,
}

/// Raw affiliate program record from the external candidate loader
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub id: String,
    pub program_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default)]
    pub brand_tier: BrandTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchant_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Program identity was verified against the merchant domain
    #[serde(default)]
    pub verified: bool,
    pub commission_rate_low: f64,
    pub commission_rate_high: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_order_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_rate: Option<f64>,
    #[serde(default)]
    pub paused: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A fully scored alternative program, ready to rank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankerCandidate {
    pub id: String,
    pub program_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    pub viability: f64,
    pub offer_merchant: f64,
    pub economics: f64,
    pub commission_rate: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_order_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_rate: Option<f64>,
    pub coverage: f64,
    pub confidence: ConfidenceLevel,
    #[serde(default)]
    pub hard_stops: Vec<HardStop>,
    /// Risk in [0, 1], lower is safer
    pub risk_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trend_score: Option<f64>,
    pub price_band: PriceBand,
}

/// A candidate with its mode-specific composite score and rank position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAlternative {
    pub candidate: RankerCandidate,
    pub composite: f64,
    pub rank: usize,
    pub winner_eligible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Named, size-capped, non-overlapping candidate group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketKind {
    Safe,
    Upside,
    Budget,
    Trending,
}

impl fmt::Display for BucketKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BucketKind::Safe => write!(f, "safe"),
            BucketKind::Upside => write!(f, "upside"),
            BucketKind::Budget => write!(f, "budget"),
            BucketKind::Trending => write!(f, "trending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bucket {
    pub kind: BucketKind,
    pub items: Vec<RankedAlternative>,
}

/// One winner plus the categorized alternative groups
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner: Option<RankedAlternative>,
    pub buckets: Vec<Bucket>,
    pub total_candidates: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rank_mode_wire_format() {
        assert_eq!(
            serde_json::to_string(&RankMode::EconomicsFirst).unwrap(),
            "\"economics_first\""
        );
        let parsed: RankMode = serde_json::from_str("\"demand_first\"").unwrap();
        assert_eq!(parsed, RankMode::DemandFirst);
    }

    #[test]
    fn test_program_record_minimal_json() {
        let record: ProgramRecord = serde_json::from_str(
            r#"{"id":"p1","program_name":"Acme","commission_rate_low":0.05,"commission_rate_high":0.1}"#,
        )
        .unwrap();
        assert_eq!(record.brand_tier, BrandTier::Unknown);
        assert!(!record.paused);
    }
}
