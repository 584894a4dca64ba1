//! Contextual evidence records: reputation, commission terms, benchmarks
//!
//! Reputation and commission records are optional as a whole; absence is an
//! expected case that lowers confidence and coverage, never an error.

use serde::{Deserialize, Serialize};

/// One review aggregator's view of a merchant
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceRating {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    /// Age of the newest review seen, in days
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recency_days: Option<u32>,
}

/// Aggregated merchant reputation from independent review sources
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReputationData {
    #[serde(default)]
    pub sources: Vec<SourceRating>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_review_count: Option<u32>,
    #[serde(default)]
    pub shipping_complaints: bool,
    #[serde(default)]
    pub quality_complaints: bool,
    #[serde(default)]
    pub support_complaints: bool,
}

/// Affiliate program terms for the scraped product's brand or category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommissionData {
    /// Commission rate range as fractions (0.08 = 8%)
    pub rate_low: f64,
    pub rate_high: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cookie_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversion_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_order_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund_rate: Option<f64>,
    /// Program enrollment needs a manual application
    #[serde(default)]
    pub requires_application: bool,
    /// Program is not currently accepting traffic
    #[serde(default)]
    pub paused: bool,
}

impl CommissionData {
    /// Midpoint of the advertised rate range
    pub fn rate_mid(&self) -> f64 {
        (self.rate_low + self.rate_high) / 2.0
    }
}

/// Category-level averages every economics ratio is measured against.
/// Always resolvable: unknown categories fall back to a global bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBenchmarks {
    pub category: String,
    pub avg_commission_rate: f64,
    pub avg_cookie_days: f64,
    pub avg_conversion_rate: f64,
    pub avg_order_value: f64,
    pub avg_refund_rate: f64,
    pub avg_review_count: f64,
    pub avg_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_mid() {
        let commission = CommissionData {
            rate_low: 0.04,
            rate_high: 0.12,
            cookie_days: None,
            network: None,
            conversion_rate: None,
            avg_order_value: None,
            refund_rate: None,
            requires_application: false,
            paused: false,
        };
        assert!((commission.rate_mid() - 0.08).abs() < 1e-9);
    }

    #[test]
    fn test_reputation_defaults() {
        let reputation: ReputationData = serde_json::from_str("{}").unwrap();
        assert!(reputation.sources.is_empty());
        assert!(!reputation.shipping_complaints);
        assert!(reputation.overall_rating.is_none());
    }
}
