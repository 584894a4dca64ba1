//! The scoring engine: three pillar scores with explainable breakdowns
//!
//! Each sub-component is its own pure function returning a
//! `ScoreComponent`; pillar functions compose by summation and clamp the
//! total. No re-normalization anywhere.

use offerlens_core::{
    Availability, CategoryBenchmarks, CommissionData, Pillar, PillarBreakdown, ReputationData,
    ScoreComponent, ScoreResult, ScrapedProduct,
};

/// Mass-market brands that score low on uniqueness and high on brand safety
pub const RECOGNIZED_BRANDS: &[&str] = &[
    "anker", "apple", "samsung", "sony", "logitech", "nike", "adidas", "philips", "bosch",
    "dyson", "lego", "xiaomi", "jbl", "hp", "dell", "ninja", "stanley",
];

/// Badge fragments that count as social-proof demand signals
const POPULARITY_TERMS: &[&str] = &["bought", "best seller", "bestseller", "popular", "trending"];

/// Marketing claims that trip the compliance scan
const HIGH_RISK_TERMS: &[&str] = &[
    "miracle",
    "clinically proven",
    "guaranteed results",
    "cure",
    "no side effects",
    "doctor recommended",
    "lose weight fast",
    "risk-free",
];

fn brand_recognized(brand: &str) -> bool {
    RECOGNIZED_BRANDS.iter().any(|b| brand.eq_ignore_ascii_case(b))
}

/// Six-band lookup against a benchmark ratio, shared by the economics
/// components. Cuts: 2.0x, 1.5x, 1.0x, 0.7x, 0.3x.
fn ratio_points(ratio: f64, table: [f64; 6]) -> f64 {
    if ratio >= 2.0 {
        table[0]
    } else if ratio >= 1.5 {
        table[1]
    } else if ratio >= 1.0 {
        table[2]
    } else if ratio >= 0.7 {
        table[3]
    } else if ratio >= 0.3 {
        table[4]
    } else {
        table[5]
    }
}

// ============================================================================
// Product Viability
// ============================================================================

fn demand_signals(product: &ScrapedProduct) -> ScoreComponent {
    let reviews = product.review_count.unwrap_or(0);
    let base = match reviews {
        1000.. => 25.0,
        500..=999 => 22.0,
        100..=499 => 18.0,
        50..=99 => 15.0,
        10..=49 => 10.0,
        1..=9 => 5.0,
        0 => 3.0,
    };

    let badge = product.claims.iter().any(|claim| {
        let claim = claim.to_lowercase();
        POPULARITY_TERMS.iter().any(|term| claim.contains(term))
    });

    let explanation = match (product.review_count, badge) {
        (Some(n), true) => format!("{} reviews plus a popularity badge", n),
        (Some(n), false) => format!("{} reviews", n),
        (None, true) => "no review count, popularity badge present".to_string(),
        (None, false) => "no review signal found".to_string(),
    };

    ScoreComponent::new(
        "demand_signals",
        if badge { base + 3.0 } else { base },
        25.0,
        explanation,
    )
}

fn review_sentiment(product: &ScrapedProduct) -> ScoreComponent {
    let (value, explanation) = match product.rating {
        Some(r) if r >= 4.5 => (25.0, format!("excellent {:.1} star rating", r)),
        Some(r) if r >= 4.0 => (21.0, format!("strong {:.1} star rating", r)),
        Some(r) if r >= 3.5 => (16.0, format!("decent {:.1} star rating", r)),
        Some(r) if r >= 3.0 => (11.0, format!("mediocre {:.1} star rating", r)),
        Some(r) if r >= 2.0 => (6.0, format!("weak {:.1} star rating", r)),
        Some(r) => (2.0, format!("poor {:.1} star rating", r)),
        None => (12.0, "no rating available, neutral".to_string()),
    };
    ScoreComponent::new("review_sentiment", value, 25.0, explanation)
}

fn pricing_competitiveness(
    product: &ScrapedProduct,
    benchmarks: &CategoryBenchmarks,
) -> ScoreComponent {
    let Some(price) = product.price.amount else {
        return ScoreComponent::new(
            "pricing_competitiveness",
            12.0,
            25.0,
            "price missing, neutral",
        );
    };

    let ratio = if benchmarks.avg_price > 0.0 {
        price / benchmarks.avg_price
    } else {
        1.0
    };
    let base = if ratio <= 0.6 {
        25.0
    } else if ratio <= 0.8 {
        22.0
    } else if ratio <= 1.1 {
        18.0
    } else if ratio <= 1.3 {
        14.0
    } else if ratio <= 1.6 {
        10.0
    } else {
        6.0
    };

    let discounted = product.price.discounted();
    let explanation = if discounted {
        format!("{:.2}x the category average, currently discounted", ratio)
    } else {
        format!("{:.2}x the category average price", ratio)
    };

    ScoreComponent::new(
        "pricing_competitiveness",
        if discounted { base + 3.0 } else { base },
        25.0,
        explanation,
    )
}

fn category_fit(product: &ScrapedProduct, user_categories: Option<&[String]>) -> ScoreComponent {
    let (value, explanation) = match (user_categories, product.category.as_deref()) {
        (None, _) => (10.0, "no audience categories supplied, neutral".to_string()),
        (Some(_), None) => (10.0, "listing category unknown, neutral".to_string()),
        (Some(list), Some(category)) => {
            let lower = category.to_lowercase();
            let matched = list.iter().any(|c| {
                let c = c.to_lowercase();
                lower == c || lower.contains(&c) || c.contains(&lower)
            });
            if matched {
                (15.0, format!("{} matches your audience", category))
            } else {
                (7.0, format!("{} is outside your audience categories", category))
            }
        }
    };
    ScoreComponent::new("category_fit", value, 15.0, explanation)
}

fn uniqueness(product: &ScrapedProduct) -> ScoreComponent {
    let (value, explanation) = match product.brand.as_deref() {
        None => (6.0, "brand unknown, neutral".to_string()),
        Some(brand) if brand_recognized(brand) => {
            (3.0, format!("{} is a saturated mass-market brand", brand))
        }
        Some(brand) => (8.0, format!("{} is a niche brand with room to differentiate", brand)),
    };
    ScoreComponent::new("uniqueness", value, 10.0, explanation)
}

fn product_viability(
    product: &ScrapedProduct,
    benchmarks: &CategoryBenchmarks,
    user_categories: Option<&[String]>,
) -> PillarBreakdown {
    PillarBreakdown::from_components(
        Pillar::ProductViability,
        vec![
            demand_signals(product),
            review_sentiment(product),
            pricing_competitiveness(product, benchmarks),
            category_fit(product, user_categories),
            uniqueness(product),
        ],
    )
}

// ============================================================================
// Offer & Merchant
// ============================================================================

fn merchant_trust(reputation: Option<&ReputationData>) -> ScoreComponent {
    let (value, explanation) = match reputation.and_then(|r| r.overall_rating) {
        Some(r) if r >= 4.5 => (30.0, format!("{:.1} aggregated merchant rating", r)),
        Some(r) if r >= 4.0 => (26.0, format!("{:.1} aggregated merchant rating", r)),
        Some(r) if r >= 3.5 => (21.0, format!("{:.1} aggregated merchant rating", r)),
        Some(r) if r >= 3.0 => (15.0, format!("middling {:.1} merchant rating", r)),
        Some(r) if r >= 2.5 => (9.0, format!("weak {:.1} merchant rating", r)),
        Some(r) => (4.0, format!("critical {:.1} merchant rating", r)),
        None => (15.0, "no reputation data, neutral".to_string()),
    };
    ScoreComponent::new("merchant_trust", value, 30.0, explanation)
}

fn shipping_returns(
    reputation: Option<&ReputationData>,
    product: &ScrapedProduct,
) -> ScoreComponent {
    let mut value = 10.0;
    let mut notes: Vec<&str> = Vec::new();

    if let Some(rep) = reputation {
        if rep.shipping_complaints {
            value -= 5.0;
            notes.push("shipping complaints on record");
        } else if rep.overall_review_count.unwrap_or(0) >= 200 {
            value += 5.0;
            notes.push("large review base with no shipping complaints");
        }
    }

    match product.availability {
        Some(Availability::InStock) => {
            value += 3.0;
            notes.push("listed in stock");
        }
        Some(Availability::OutOfStock) => {
            value -= 3.0;
            notes.push("listed out of stock");
        }
        None => {}
    }

    let explanation = if notes.is_empty() {
        "no fulfilment signals, neutral".to_string()
    } else {
        notes.join(", ")
    };
    ScoreComponent::new("shipping_returns", value, 20.0, explanation)
}

fn policy_clarity(reputation: Option<&ReputationData>) -> ScoreComponent {
    let mut value = 10.0;
    let mut notes: Vec<&str> = Vec::new();

    if let Some(rep) = reputation {
        if rep.support_complaints {
            value -= 4.0;
            notes.push("support complaints on record");
        }
        if rep.overall_rating.unwrap_or(0.0) >= 4.0 {
            value += 3.0;
            notes.push("well-rated merchant");
        }
    }

    let explanation = if notes.is_empty() {
        "no policy signals, neutral".to_string()
    } else {
        notes.join(", ")
    };
    ScoreComponent::new("policy_clarity", value, 15.0, explanation)
}

fn brand_risk(product: &ScrapedProduct) -> ScoreComponent {
    let reviews = product.review_count.unwrap_or(0);
    let (value, explanation) = match product.brand.as_deref() {
        Some(brand) if brand_recognized(brand) => {
            (20.0, format!("{} is an established brand", brand))
        }
        _ if reviews < 10 => (
            5.0,
            "unrecognized brand with almost no review history".to_string(),
        ),
        _ => (12.0, "unrecognized brand, neutral".to_string()),
    };
    ScoreComponent::new("brand_risk", value, 20.0, explanation)
}

fn compliance(product: &ScrapedProduct) -> ScoreComponent {
    let flagged: Vec<&str> = HIGH_RISK_TERMS
        .iter()
        .copied()
        .filter(|term| {
            product
                .marketing_text()
                .any(|text| text.to_lowercase().contains(term))
        })
        .collect();

    if flagged.is_empty() {
        ScoreComponent::new("compliance", 13.0, 15.0, "no high-risk marketing claims")
    } else {
        ScoreComponent::new(
            "compliance",
            5.0,
            15.0,
            format!("high-risk claim language: {}", flagged.join(", ")),
        )
    }
}

fn offer_merchant(
    product: &ScrapedProduct,
    reputation: Option<&ReputationData>,
) -> PillarBreakdown {
    PillarBreakdown::from_components(
        Pillar::OfferMerchant,
        vec![
            merchant_trust(reputation),
            shipping_returns(reputation, product),
            policy_clarity(reputation),
            brand_risk(product),
            compliance(product),
        ],
    )
}

// ============================================================================
// Economics Feasibility
// ============================================================================

fn commission_component(
    commission: Option<&CommissionData>,
    benchmarks: &CategoryBenchmarks,
) -> ScoreComponent {
    let (ratio, mut explanation) = match commission {
        Some(c) if benchmarks.avg_commission_rate > 0.0 => {
            let ratio = c.rate_mid() / benchmarks.avg_commission_rate;
            (ratio, format!("{:.1}x the category commission rate", ratio))
        }
        Some(_) => (1.0, "category benchmark unavailable, neutral".to_string()),
        None => (1.0, "no program terms, assuming category benchmark".to_string()),
    };

    let mut value = ratio_points(ratio, [40.0, 34.0, 27.0, 19.0, 11.0, 5.0]);

    if let Some(days) = commission.and_then(|c| c.cookie_days) {
        if days >= 60 {
            value += 3.0;
            explanation.push_str(&format!(", long {}d cookie", days));
        } else if days <= 7 {
            value -= 3.0;
            explanation.push_str(&format!(", short {}d cookie", days));
        }
    }

    ScoreComponent::new("commission_component", value, 40.0, explanation)
}

fn conversion_component(
    commission: Option<&CommissionData>,
    benchmarks: &CategoryBenchmarks,
) -> ScoreComponent {
    let (ratio, explanation) = match commission.and_then(|c| c.conversion_rate) {
        Some(rate) if benchmarks.avg_conversion_rate > 0.0 => {
            let ratio = rate / benchmarks.avg_conversion_rate;
            (ratio, format!("{:.1}x the category conversion rate", ratio))
        }
        _ => (1.0, "no conversion data, assuming category benchmark".to_string()),
    };
    ScoreComponent::new(
        "conversion_component",
        ratio_points(ratio, [25.0, 21.0, 17.0, 12.0, 7.0, 3.0]),
        25.0,
        explanation,
    )
}

fn aov_component(
    commission: Option<&CommissionData>,
    benchmarks: &CategoryBenchmarks,
) -> ScoreComponent {
    let (ratio, explanation) = match commission.and_then(|c| c.avg_order_value) {
        Some(aov) if benchmarks.avg_order_value > 0.0 => {
            let ratio = aov / benchmarks.avg_order_value;
            (ratio, format!("{:.1}x the category order value", ratio))
        }
        _ => (1.0, "no order value data, assuming category benchmark".to_string()),
    };
    ScoreComponent::new(
        "aov_component",
        ratio_points(ratio, [20.0, 17.0, 13.0, 9.0, 5.0, 2.0]),
        20.0,
        explanation,
    )
}

fn refund_adjustment(
    commission: Option<&CommissionData>,
    benchmarks: &CategoryBenchmarks,
) -> ScoreComponent {
    let (refund, assumed) = match commission.and_then(|c| c.refund_rate) {
        Some(rate) => (rate, false),
        None => (benchmarks.avg_refund_rate, true),
    };

    let value = if refund <= 0.03 {
        15.0
    } else if refund <= 0.06 {
        12.0
    } else if refund <= 0.10 {
        9.0
    } else if refund <= 0.15 {
        6.0
    } else if refund <= 0.25 {
        4.0
    } else {
        2.0
    };

    let explanation = if assumed {
        format!("assumed {:.0}% category refund rate", refund * 100.0)
    } else {
        format!("{:.0}% refund rate", refund * 100.0)
    };
    ScoreComponent::new("refund_adjustment", value, 15.0, explanation)
}

fn economics_feasibility(
    commission: Option<&CommissionData>,
    benchmarks: &CategoryBenchmarks,
) -> PillarBreakdown {
    PillarBreakdown::from_components(
        Pillar::EconomicsFeasibility,
        vec![
            commission_component(commission, benchmarks),
            conversion_component(commission, benchmarks),
            aov_component(commission, benchmarks),
            refund_adjustment(commission, benchmarks),
        ],
    )
}

// ============================================================================
// Entry point
// ============================================================================

/// Compute the three pillar scores for one scraped listing.
///
/// Pure: identical inputs produce bit-identical output on every call.
pub fn compute_scores(
    product: &ScrapedProduct,
    reputation: Option<&ReputationData>,
    commission: Option<&CommissionData>,
    benchmarks: &CategoryBenchmarks,
    user_categories: Option<&[String]>,
) -> ScoreResult {
    let viability = product_viability(product, benchmarks, user_categories);
    let merchant = offer_merchant(product, reputation);
    let economics = economics_feasibility(commission, benchmarks);

    ScoreResult {
        viability: viability.total,
        offer_merchant: merchant.total,
        economics: economics.total,
        breakdowns: vec![viability, merchant, economics],
    }
}
