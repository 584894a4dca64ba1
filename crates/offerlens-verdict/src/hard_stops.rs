//! Hard-stop detection
//!
//! A hard stop unconditionally prevents a GREEN verdict regardless of how
//! well the pillars scored. Detection looks only at raw evidence, never at
//! derived scores, so a generous sub-model can never mask a disqualifier.

use offerlens_core::{CommissionData, HardStop, ReputationData, ScrapedProduct};

/// Merchant ratings below this are disqualifying
pub const MERCHANT_RATING_FLOOR: f64 = 2.5;
/// Refund rates above this are disqualifying
pub const REFUND_RATE_CEILING: f64 = 0.25;

/// Scan the evidence for disqualifying conditions
pub fn detect_hard_stops(
    product: &ScrapedProduct,
    reputation: Option<&ReputationData>,
    commission: Option<&CommissionData>,
) -> Vec<HardStop> {
    let mut stops = Vec::new();

    if let Some(rating) = reputation.and_then(|r| r.overall_rating) {
        if rating < MERCHANT_RATING_FLOOR {
            stops.push(HardStop::MerchantTrustCritical);
        }
    }

    // No reviews on the listing and no reputation record anywhere
    let no_reviews = product.review_count.unwrap_or(0) == 0;
    if no_reviews && reputation.is_none() {
        stops.push(HardStop::NoDemandEvidence);
    }

    if let Some(commission) = commission {
        if commission.paused {
            stops.push(HardStop::ProgramPaused);
        }
        if commission.refund_rate.unwrap_or(0.0) > REFUND_RATE_CEILING {
            stops.push(HardStop::RefundExcessive);
        }
    }

    stops
}
