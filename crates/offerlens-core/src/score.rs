//! Score, confidence, and coverage result types
//!
//! Pillar totals are the clamped sum of their components; there is no
//! hidden normalization step anywhere in the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three independent 0-100 ratings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pillar {
    ProductViability,
    OfferMerchant,
    EconomicsFeasibility,
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Pillar::ProductViability => write!(f, "product_viability"),
            Pillar::OfferMerchant => write!(f, "offer_merchant"),
            Pillar::EconomicsFeasibility => write!(f, "economics_feasibility"),
        }
    }
}

/// One named sub-score with its short human-readable explanation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub value: f64,
    pub max: f64,
    pub explanation: String,
}

impl ScoreComponent {
    /// Build a component, clamping the value into `[0, max]`
    pub fn new(name: impl Into<String>, value: f64, max: f64, explanation: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.clamp(0.0, max),
            max,
            explanation: explanation.into(),
        }
    }

    /// Score as a fraction of the component maximum
    pub fn ratio(&self) -> f64 {
        if self.max > 0.0 {
            self.value / self.max
        } else {
            0.0
        }
    }
}

/// A pillar total with the components it was summed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PillarBreakdown {
    pub pillar: Pillar,
    pub total: f64,
    pub components: Vec<ScoreComponent>,
}

impl PillarBreakdown {
    /// Sum the components and clamp the total into `[0, 100]`
    pub fn from_components(pillar: Pillar, components: Vec<ScoreComponent>) -> Self {
        let total = components
            .iter()
            .map(|c| c.value)
            .sum::<f64>()
            .clamp(0.0, 100.0);
        Self { pillar, total, components }
    }
}

/// The three pillar totals in wire shape
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PillarTotals {
    pub viability: f64,
    pub offer_merchant: f64,
    pub economics: f64,
}

/// Full scoring output: totals plus explainable breakdowns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub viability: f64,
    pub offer_merchant: f64,
    pub economics: f64,
    pub breakdowns: Vec<PillarBreakdown>,
}

impl ScoreResult {
    pub fn totals(&self) -> PillarTotals {
        PillarTotals {
            viability: self.viability,
            offer_merchant: self.offer_merchant,
            economics: self.economics,
        }
    }

    /// Unweighted mean of the three pillars
    pub fn overall(&self) -> f64 {
        (self.viability + self.offer_merchant + self.economics) / 3.0
    }

    pub fn min_pillar(&self) -> f64 {
        self.viability.min(self.offer_merchant).min(self.economics)
    }
}

/// Coarse classification of evidentiary strength, distinct from the scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfidenceLevel {
    #[default]
    Low = 0,
    Med = 1,
    High = 2,
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfidenceLevel::Low => write!(f, "LOW"),
            ConfidenceLevel::Med => write!(f, "MED"),
            ConfidenceLevel::High => write!(f, "HIGH"),
        }
    }
}

/// Independent evidence classes counted by the confidence evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceClass {
    OnPage,
    Reputation,
    Program,
    ReviewVolume,
}

/// One contributing evidence source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvidenceSource {
    pub name: String,
    pub class: SourceClass,
    pub items: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recency_days: Option<u32>,
}

/// How well independent reputation sources agree with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceAgreement {
    Agrees,
    Mixed,
    SingleSource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceResult {
    pub level: ConfidenceLevel,
    pub sources: Vec<EvidenceSource>,
    pub agreement: SourceAgreement,
    pub data_points: u32,
}

/// The fixed checklist of expected evidence fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageChecklist {
    pub price: bool,
    pub reviews: bool,
    pub rating: bool,
    pub brand: bool,
    pub category: bool,
    pub reputation_primary: bool,
    pub reputation_secondary: bool,
    pub commission_rate: bool,
    pub cookie_duration: bool,
    pub conversion_rate: bool,
    pub order_value: bool,
    pub refund_rate: bool,
    pub trend: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageResult {
    /// Weighted completeness score, 0-100
    pub score: f64,
    pub checklist: CoverageChecklist,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_clamps_into_range() {
        let over = ScoreComponent::new("demand_signals", 40.0, 25.0, "too much");
        assert_eq!(over.value, 25.0);

        let under = ScoreComponent::new("demand_signals", -4.0, 25.0, "too little");
        assert_eq!(under.value, 0.0);
    }

    #[test]
    fn test_pillar_total_is_clamped_sum() {
        let breakdown = PillarBreakdown::from_components(
            Pillar::ProductViability,
            vec![
                ScoreComponent::new("a", 25.0, 25.0, ""),
                ScoreComponent::new("b", 18.0, 25.0, ""),
            ],
        );
        assert_eq!(breakdown.total, 43.0);
    }

    #[test]
    fn test_confidence_level_is_ordered() {
        assert!(ConfidenceLevel::Low < ConfidenceLevel::Med);
        assert!(ConfidenceLevel::Med < ConfidenceLevel::High);
    }

    #[test]
    fn test_confidence_level_wire_format() {
        let json = serde_json::to_string(&ConfidenceLevel::Med).unwrap();
        assert_eq!(json, "\"MED\"");
    }
}
