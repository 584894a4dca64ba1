//! Confidence evaluation: how much independent evidence backs the scores
//!
//! Counts populated fields per evidence class. The level is a function of
//! both volume (data points) and diversity (distinct source classes), so a
//! single rich source can never fake high confidence.

use offerlens_core::{
    CommissionData, ConfidenceLevel, ConfidenceResult, EvidenceSource, ReputationData,
    ScrapedProduct, SourceAgreement, SourceClass,
};

/// Review volume counts as its own evidence class above this threshold
const REVIEW_VOLUME_FLOOR: u32 = 50;

/// Two aggregator ratings within this many stars count as agreeing
const AGREEMENT_TOLERANCE: f64 = 0.5;

fn on_page_source(product: &ScrapedProduct) -> Option<EvidenceSource> {
    let items = [
        product.title.is_some(),
        product.price.amount.is_some(),
        product.rating.is_some(),
        product.review_count.is_some(),
        product.brand.is_some(),
        product.category.is_some(),
        product.description.is_some(),
        product.availability.is_some(),
    ]
    .iter()
    .filter(|populated| **populated)
    .count() as u32;

    (items > 0).then(|| EvidenceSource {
        name: "listing".to_string(),
        class: SourceClass::OnPage,
        items,
        recency_days: None,
    })
}

fn reputation_sources(reputation: &ReputationData) -> Vec<EvidenceSource> {
    let mut sources: Vec<EvidenceSource> = reputation
        .sources
        .iter()
        .filter_map(|s| {
            let items = s.rating.is_some() as u32 + s.review_count.is_some() as u32;
            (items > 0).then(|| EvidenceSource {
                name: s.name.clone(),
                class: SourceClass::Reputation,
                items,
                recency_days: s.recency_days,
            })
        })
        .collect();

    // The aggregate view plus the observed complaint flags
    let aggregate_items = reputation.overall_rating.is_some() as u32
        + reputation.overall_review_count.is_some() as u32
        + 1;
    sources.push(EvidenceSource {
        name: "aggregate".to_string(),
        class: SourceClass::Reputation,
        items: aggregate_items,
        recency_days: None,
    });
    sources
}

fn program_source(commission: &CommissionData) -> EvidenceSource {
    let items = 1 // the rate range itself
        + commission.cookie_days.is_some() as u32
        + commission.conversion_rate.is_some() as u32
        + commission.avg_order_value.is_some() as u32
        + commission.refund_rate.is_some() as u32
        + commission.network.is_some() as u32;

    EvidenceSource {
        name: commission
            .network
            .clone()
            .unwrap_or_else(|| "affiliate_program".to_string()),
        class: SourceClass::Program,
        items,
        recency_days: None,
    }
}

fn agreement(reputation: Option<&ReputationData>) -> SourceAgreement {
    let ratings: Vec<f64> = reputation
        .map(|r| r.sources.iter().filter_map(|s| s.rating).collect())
        .unwrap_or_default();

    if ratings.len() >= 2 {
        let min = ratings.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = ratings.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        if max - min <= AGREEMENT_TOLERANCE {
            SourceAgreement::Agrees
        } else {
            SourceAgreement::Mixed
        }
    } else {
        SourceAgreement::SingleSource
    }
}

/// Classify evidentiary strength from the sources actually available
pub fn evaluate_confidence(
    product: &ScrapedProduct,
    reputation: Option<&ReputationData>,
    commission: Option<&CommissionData>,
) -> ConfidenceResult {
    let mut sources = Vec::new();

    if let Some(on_page) = on_page_source(product) {
        sources.push(on_page);
    }
    if let Some(rep) = reputation {
        sources.extend(reputation_sources(rep));
    }
    if let Some(com) = commission {
        sources.push(program_source(com));
    }
    if product.review_count.unwrap_or(0) >= REVIEW_VOLUME_FLOOR {
        sources.push(EvidenceSource {
            name: "review_volume".to_string(),
            class: SourceClass::ReviewVolume,
            items: 1,
            recency_days: None,
        });
    }

    let data_points: u32 = sources.iter().map(|s| s.items).sum();
    let mut classes: Vec<SourceClass> = sources.iter().map(|s| s.class).collect();
    classes.dedup();
    let class_count = {
        let mut distinct = classes.clone();
        distinct.sort_by_key(|c| *c as u8);
        distinct.dedup();
        distinct.len()
    };

    let level = if data_points >= 8 && class_count >= 3 {
        ConfidenceLevel::High
    } else if data_points >= 4 && class_count >= 2 {
        ConfidenceLevel::Med
    } else {
        ConfidenceLevel::Low
    };

    ConfidenceResult {
        level,
        sources,
        agreement: agreement(reputation),
        data_points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offerlens_core::{Price, SourceRating};

    fn rich_reputation() -> ReputationData {
        ReputationData {
            sources: vec![
                SourceRating {
                    name: "trustwave".to_string(),
                    rating: Some(4.3),
                    review_count: Some(1800),
                    recency_days: Some(12),
                },
                SourceRating {
                    name: "reviewly".to_string(),
                    rating: Some(4.1),
                    review_count: Some(650),
                    recency_days: Some(30),
                },
            ],
            overall_rating: Some(4.2),
            overall_review_count: Some(2450),
            shipping_complaints: false,
            quality_complaints: false,
            support_complaints: false,
        }
    }

    fn full_commission() -> CommissionData {
        CommissionData {
            rate_low: 0.05,
            rate_high: 0.10,
            cookie_days: Some(30),
            network: Some("impact".to_string()),
            conversion_rate: Some(0.025),
            avg_order_value: Some(60.0),
            refund_rate: Some(0.05),
            requires_application: false,
            paused: false,
        }
    }

    #[test]
    fn test_sparse_listing_alone_is_low() {
        // Title and price only: two points in one class
        let product = ScrapedProduct {
            title: Some("Bottle".to_string()),
            price: Price {
                amount: Some(12.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = evaluate_confidence(&product, None, None);
        assert_eq!(result.level, ConfidenceLevel::Low);
        assert_eq!(result.data_points, 2);
    }

    #[test]
    fn test_three_source_classes_reach_high() {
        let product = ScrapedProduct {
            title: Some("Bottle".to_string()),
            rating: Some(4.5),
            review_count: Some(800),
            brand: Some("Obscurio".to_string()),
            ..Default::default()
        };
        let result =
            evaluate_confidence(&product, Some(&rich_reputation()), Some(&full_commission()));
        assert_eq!(result.level, ConfidenceLevel::High);
        assert!(result.data_points >= 8);
        assert_eq!(result.agreement, SourceAgreement::Agrees);
    }

    #[test]
    fn test_two_classes_reach_med() {
        let product = ScrapedProduct {
            title: Some("Bottle".to_string()),
            rating: Some(4.5),
            review_count: Some(12),
            price: Price {
                amount: Some(20.0),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = evaluate_confidence(&product, None, Some(&full_commission()));
        assert_eq!(result.level, ConfidenceLevel::Med);
    }

    #[test]
    fn test_divergent_aggregators_read_as_mixed() {
        let mut rep = rich_reputation();
        rep.sources[1].rating = Some(2.9);
        let result = evaluate_confidence(&ScrapedProduct::default(), Some(&rep), None);
        assert_eq!(result.agreement, SourceAgreement::Mixed);
    }

    #[test]
    fn test_review_volume_counts_as_own_class() {
        let product = ScrapedProduct {
            review_count: Some(75),
            ..Default::default()
        };
        let result = evaluate_confidence(&product, None, None);
        assert!(result
            .sources
            .iter()
            .any(|s| s.class == SourceClass::ReviewVolume));
    }
}
