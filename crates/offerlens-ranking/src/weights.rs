//! Mode-keyed weighting profiles
//!
//! The numbers are tuned, not contractual: callers can load an alternative
//! table from YAML and every ranking entry point accepts explicit weights.

use offerlens_core::{RankMode, RankerCandidate};
use serde::{Deserialize, Serialize};

/// Pillar weights used to compose a candidate's composite score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RankWeights {
    pub viability: f64,
    pub offer_merchant: f64,
    pub economics: f64,
}

impl RankWeights {
    /// Default table for a ranking mode
    pub fn for_mode(mode: RankMode) -> Self {
        match mode {
            RankMode::Standard => Self {
                viability: 0.34,
                offer_merchant: 0.33,
                economics: 0.33,
            },
            RankMode::DemandFirst => Self {
                viability: 0.55,
                offer_merchant: 0.20,
                economics: 0.25,
            },
            RankMode::TrustFirst => Self {
                viability: 0.20,
                offer_merchant: 0.55,
                economics: 0.25,
            },
            RankMode::EconomicsFirst => Self {
                viability: 0.25,
                offer_merchant: 0.20,
                economics: 0.55,
            },
        }
    }

    /// Load a tuned table from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml).map_err(|e| e.to_string())
    }

    /// Weighted pillar sum for one candidate
    pub fn composite(&self, candidate: &RankerCandidate) -> f64 {
        self.viability * candidate.viability
            + self.offer_merchant * candidate.offer_merchant
            + self.economics * candidate.economics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_mode_emphasizes_its_pillar() {
        let demand = RankWeights::for_mode(RankMode::DemandFirst);
        assert!(demand.viability > demand.offer_merchant);
        assert!(demand.viability > demand.economics);

        let trust = RankWeights::for_mode(RankMode::TrustFirst);
        assert!(trust.offer_merchant > trust.viability);

        let economics = RankWeights::for_mode(RankMode::EconomicsFirst);
        assert!(economics.economics > economics.offer_merchant);
    }

    #[test]
    fn test_weights_sum_to_one() {
        for mode in [
            RankMode::Standard,
            RankMode::DemandFirst,
            RankMode::TrustFirst,
            RankMode::EconomicsFirst,
        ] {
            let w = RankWeights::for_mode(mode);
            let sum = w.viability + w.offer_merchant + w.economics;
            assert!((sum - 1.0).abs() < 1e-9, "{:?}: {}", mode, sum);
        }
    }

    #[test]
    fn test_from_yaml() {
        let w = RankWeights::from_yaml("viability: 0.5\noffer_merchant: 0.3\neconomics: 0.2\n")
            .unwrap();
        assert_eq!(w.viability, 0.5);
        assert!(RankWeights::from_yaml("not: a: weight:").is_err());
    }
}
