//! Coverage: a pure boolean-to-score table over the expected evidence
//! checklist. No heuristics; all weights positive, so the score is
//! monotone in the checklist.

use offerlens_core::{
    CommissionData, CoverageChecklist, CoverageResult, ReputationData, ScrapedProduct,
};

// Checklist weights, summing to 100
const W_PRICE: f64 = 12.0;
const W_REVIEWS: f64 = 10.0;
const W_RATING: f64 = 8.0;
const W_BRAND: f64 = 6.0;
const W_CATEGORY: f64 = 6.0;
const W_REPUTATION_PRIMARY: f64 = 8.0;
const W_REPUTATION_SECONDARY: f64 = 8.0;
const W_COMMISSION_RATE: f64 = 12.0;
const W_COOKIE: f64 = 6.0;
const W_CONVERSION: f64 = 8.0;
const W_ORDER_VALUE: f64 = 8.0;
const W_REFUND: f64 = 4.0;
const W_TREND: f64 = 4.0;

/// Weighted sum over an already-built checklist
pub fn checklist_score(checklist: &CoverageChecklist) -> f64 {
    let entries = [
        (checklist.price, W_PRICE),
        (checklist.reviews, W_REVIEWS),
        (checklist.rating, W_RATING),
        (checklist.brand, W_BRAND),
        (checklist.category, W_CATEGORY),
        (checklist.reputation_primary, W_REPUTATION_PRIMARY),
        (checklist.reputation_secondary, W_REPUTATION_SECONDARY),
        (checklist.commission_rate, W_COMMISSION_RATE),
        (checklist.cookie_duration, W_COOKIE),
        (checklist.conversion_rate, W_CONVERSION),
        (checklist.order_value, W_ORDER_VALUE),
        (checklist.refund_rate, W_REFUND),
        (checklist.trend, W_TREND),
    ];
    entries
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, weight)| weight)
        .sum()
}

/// Build the checklist from the evidence actually supplied and score it
pub fn compute_coverage(
    product: &ScrapedProduct,
    reputation: Option<&ReputationData>,
    commission: Option<&CommissionData>,
    trend_available: bool,
) -> CoverageResult {
    let checklist = CoverageChecklist {
        price: product.price.amount.is_some(),
        reviews: product.review_count.is_some(),
        rating: product.rating.is_some(),
        brand: product.brand.is_some(),
        category: product.category.is_some(),
        reputation_primary: reputation.map(|r| !r.sources.is_empty()).unwrap_or(false),
        reputation_secondary: reputation.map(|r| r.sources.len() >= 2).unwrap_or(false),
        commission_rate: commission.is_some(),
        cookie_duration: commission.and_then(|c| c.cookie_days).is_some(),
        conversion_rate: commission.and_then(|c| c.conversion_rate).is_some(),
        order_value: commission.and_then(|c| c.avg_order_value).is_some(),
        refund_rate: commission.and_then(|c| c.refund_rate).is_some(),
        trend: trend_available,
    };

    CoverageResult {
        score: checklist_score(&checklist),
        checklist,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flip(checklist: &CoverageChecklist, index: usize) -> CoverageChecklist {
        let mut c = *checklist;
        match index {
            0 => c.price = true,
            1 => c.reviews = true,
            2 => c.rating = true,
            3 => c.brand = true,
            4 => c.category = true,
            5 => c.reputation_primary = true,
            6 => c.reputation_secondary = true,
            7 => c.commission_rate = true,
            8 => c.cookie_duration = true,
            9 => c.conversion_rate = true,
            10 => c.order_value = true,
            11 => c.refund_rate = true,
            12 => c.trend = true,
            _ => unreachable!(),
        }
        c
    }

    #[test]
    fn test_empty_checklist_scores_zero() {
        assert_eq!(checklist_score(&CoverageChecklist::default()), 0.0);
    }

    #[test]
    fn test_full_checklist_scores_one_hundred() {
        let mut full = CoverageChecklist::default();
        for i in 0..13 {
            full = flip(&full, i);
        }
        assert!((checklist_score(&full) - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_score_is_monotone_in_every_field() {
        // Flipping any false field to true never decreases the score,
        // starting from every cumulative prefix.
        let mut current = CoverageChecklist::default();
        let mut last = checklist_score(&current);
        for i in 0..13 {
            current = flip(&current, i);
            let next = checklist_score(&current);
            assert!(next > last, "field {} did not increase the score", i);
            last = next;
        }
    }

    #[test]
    fn test_checklist_reflects_supplied_evidence() {
        let product = ScrapedProduct {
            rating: Some(4.0),
            review_count: Some(10),
            ..Default::default()
        };
        let result = compute_coverage(&product, None, None, false);
        assert!(result.checklist.rating);
        assert!(result.checklist.reviews);
        assert!(!result.checklist.price);
        assert!(!result.checklist.commission_rate);
        assert_eq!(result.score, W_REVIEWS + W_RATING);
    }
}
