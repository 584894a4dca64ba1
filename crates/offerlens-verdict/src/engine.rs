//! The verdict engine: one of four labels, plus the evidence to audit it

use offerlens_core::{
    ConfidenceLevel, HardStop, ScoreComponent, ScoreResult, VerdictResult, VerdictStatus,
};

/// Threshold table the status is derived from, absent hard stops.
/// Tunable configuration, not a wire contract.
#[derive(Debug, Clone)]
pub struct VerdictThresholds {
    /// Every pillar must reach this for GREEN
    pub strong_pillar: f64,
    /// Overall mean below this with LOW confidence recommends a manual test
    pub test_first_overall: f64,
    /// Overall mean below this with confidence >= MED is a confident reject
    pub red_overall: f64,
}

impl Default for VerdictThresholds {
    fn default() -> Self {
        Self {
            strong_pillar: 65.0,
            test_first_overall: 45.0,
            red_overall: 40.0,
        }
    }
}

pub struct VerdictEngine {
    thresholds: VerdictThresholds,
}

impl Default for VerdictEngine {
    fn default() -> Self {
        Self::new(VerdictThresholds::default())
    }
}

impl VerdictEngine {
    pub fn new(thresholds: VerdictThresholds) -> Self {
        Self { thresholds }
    }

    /// Single evaluation over scores, confidence, and hard stops.
    ///
    /// Hard stops force RED before any threshold is consulted. The caller
    /// passes assumptions collected while gathering evidence (benchmark
    /// fallbacks, absent lookups); the engine appends the click-volume
    /// assumption every earnings figure rests on.
    pub fn evaluate(
        &self,
        scores: &ScoreResult,
        confidence: ConfidenceLevel,
        hard_stops: Vec<HardStop>,
        mut assumptions: Vec<String>,
    ) -> VerdictResult {
        assumptions.push("assumes 500-2000 monthly clicks on the affiliate link".to_string());

        let (top_pros, top_risks) = signals(scores);

        if !hard_stops.is_empty() {
            let reasons: Vec<String> = hard_stops.iter().map(|s| s.to_string()).collect();
            return VerdictResult {
                status: VerdictStatus::Red,
                primary_action: format!("Do not promote: {}", reasons.join("; ")),
                hard_stops,
                top_pros,
                top_risks,
                key_assumptions: assumptions,
            };
        }

        let overall = scores.overall();
        let (status, primary_action) = if scores.min_pillar() >= self.thresholds.strong_pillar
            && confidence >= ConfidenceLevel::Med
        {
            (
                VerdictStatus::Green,
                "Promote this product now".to_string(),
            )
        } else if overall < self.thresholds.test_first_overall
            && confidence == ConfidenceLevel::Low
        {
            (
                VerdictStatus::TestFirst,
                "Order a sample and verify the offer before promoting".to_string(),
            )
        } else if overall < self.thresholds.red_overall {
            (
                VerdictStatus::Red,
                "Do not promote; pick an alternative below".to_string(),
            )
        } else {
            (
                VerdictStatus::Yellow,
                "Verify the listing and merchant before promoting".to_string(),
            )
        };

        tracing::debug!(%status, overall, %confidence, "verdict evaluated");

        VerdictResult {
            status,
            primary_action,
            hard_stops,
            top_pros,
            top_risks,
            key_assumptions: assumptions,
        }
    }
}

/// Top 3 best and worst sub-components by score fraction, across all
/// pillars. Name ties break alphabetically so output never depends on
/// breakdown order.
fn signals(scores: &ScoreResult) -> (Vec<String>, Vec<String>) {
    let mut components: Vec<&ScoreComponent> = scores
        .breakdowns
        .iter()
        .flat_map(|b| b.components.iter())
        .collect();

    components.sort_by(|a, b| {
        b.ratio()
            .total_cmp(&a.ratio())
            .then_with(|| a.name.cmp(&b.name))
    });

    let describe = |c: &ScoreComponent| format!("{}: {}", c.name, c.explanation);
    let pros = components.iter().take(3).map(|c| describe(c)).collect();
    let risks = components.iter().rev().take(3).map(|c| describe(c)).collect();
    (pros, risks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerlens_core::{Pillar, PillarBreakdown};

    fn scores(viability: f64, merchant: f64, economics: f64) -> ScoreResult {
        let breakdown = |pillar, total: f64| PillarBreakdown {
            pillar,
            total,
            components: vec![
                ScoreComponent::new("strong_part", total / 2.0, total / 2.0, "does well"),
                ScoreComponent::new("weak_part", total / 4.0, total / 2.0, "lags behind"),
            ],
        };
        ScoreResult {
            viability,
            offer_merchant: merchant,
            economics,
            breakdowns: vec![
                breakdown(Pillar::ProductViability, viability),
                breakdown(Pillar::OfferMerchant, merchant),
                breakdown(Pillar::EconomicsFeasibility, economics),
            ],
        }
    }

    #[test]
    fn test_hard_stop_forces_red_over_perfect_scores() {
        let verdict = VerdictEngine::default().evaluate(
            &scores(95.0, 95.0, 95.0),
            ConfidenceLevel::High,
            vec![HardStop::ProgramPaused],
            vec![],
        );
        assert_eq!(verdict.status, VerdictStatus::Red);
        assert!(!verdict.hard_stops.is_empty());
    }

    #[test]
    fn test_strong_pillars_with_confidence_go_green() {
        let verdict = VerdictEngine::default().evaluate(
            &scores(80.0, 72.0, 68.0),
            ConfidenceLevel::Med,
            vec![],
            vec![],
        );
        assert_eq!(verdict.status, VerdictStatus::Green);
    }

    #[test]
    fn test_strong_pillars_without_confidence_stay_yellow() {
        let verdict = VerdictEngine::default().evaluate(
            &scores(80.0, 72.0, 68.0),
            ConfidenceLevel::Low,
            vec![],
            vec![],
        );
        assert_eq!(verdict.status, VerdictStatus::Yellow);
    }

    #[test]
    fn test_weak_and_unproven_recommends_test_first() {
        let verdict = VerdictEngine::default().evaluate(
            &scores(40.0, 45.0, 42.0),
            ConfidenceLevel::Low,
            vec![],
            vec![],
        );
        assert_eq!(verdict.status, VerdictStatus::TestFirst);
    }

    #[test]
    fn test_confidently_bad_is_red() {
        let verdict = VerdictEngine::default().evaluate(
            &scores(30.0, 35.0, 38.0),
            ConfidenceLevel::High,
            vec![],
            vec![],
        );
        assert_eq!(verdict.status, VerdictStatus::Red);
    }

    #[test]
    fn test_middling_scores_are_yellow() {
        let verdict = VerdictEngine::default().evaluate(
            &scores(60.0, 55.0, 58.0),
            ConfidenceLevel::Med,
            vec![],
            vec![],
        );
        assert_eq!(verdict.status, VerdictStatus::Yellow);
    }

    #[test]
    fn test_signals_and_assumptions_are_emitted() {
        let verdict = VerdictEngine::default().evaluate(
            &scores(70.0, 66.0, 80.0),
            ConfidenceLevel::Med,
            vec![],
            vec!["no reputation data found".to_string()],
        );
        assert_eq!(verdict.top_pros.len(), 3);
        assert_eq!(verdict.top_risks.len(), 3);
        assert!(verdict.top_pros[0].contains("strong_part"));
        assert!(verdict.top_risks[0].contains("weak_part"));
        assert!(verdict
            .key_assumptions
            .iter()
            .any(|a| a.contains("no reputation data")));
        assert!(verdict
            .key_assumptions
            .iter()
            .any(|a| a.contains("monthly clicks")));
    }

    #[test]
    fn test_never_green_with_hard_stops_across_grid() {
        let engine = VerdictEngine::default();
        for v in [10.0, 50.0, 90.0, 100.0] {
            for level in [
                ConfidenceLevel::Low,
                ConfidenceLevel::Med,
                ConfidenceLevel::High,
            ] {
                let verdict = engine.evaluate(
                    &scores(v, v, v),
                    level,
                    vec![HardStop::MerchantTrustCritical],
                    vec![],
                );
                assert_ne!(verdict.status, VerdictStatus::Green);
            }
        }
    }
}
