//! Candidate scoring: from raw affiliate program records to ranker input
//!
//! The program-level analogue of the listing scoring engine, calibrated
//! for the fields a network catalog actually carries: brand tier, merchant
//! rating, verification flag, refund rate, paused flag.

use offerlens_core::{
    BrandTier, CategoryBenchmarks, ConfidenceLevel, HardStop, PriceBand, ProgramRecord,
    RankerCandidate,
};

/// Merchant ratings below this are disqualifying for candidates too
const MERCHANT_RATING_FLOOR: f64 = 2.5;
const REFUND_RATE_CEILING: f64 = 0.25;

fn viability_score(record: &ProgramRecord) -> f64 {
    let base: f64 = match record.brand_tier {
        BrandTier::Recognized => 70.0,
        BrandTier::Niche => 60.0,
        BrandTier::Unknown => 45.0,
    };
    let reviews: f64 = match record.review_count.unwrap_or(0) {
        1000.. => 20.0,
        100..=999 => 12.0,
        10..=99 => 5.0,
        _ => 0.0,
    };
    let trend: f64 = if record.trend_score.unwrap_or(0.0) >= 0.6 {
        8.0
    } else {
        0.0
    };
    (base + reviews + trend).clamp(0.0, 100.0)
}

fn merchant_score(record: &ProgramRecord) -> f64 {
    let base: f64 = match record.merchant_rating {
        Some(r) if r >= 4.5 => 85.0,
        Some(r) if r >= 4.0 => 75.0,
        Some(r) if r >= 3.5 => 62.0,
        Some(r) if r >= 3.0 => 48.0,
        Some(r) if r >= 2.5 => 35.0,
        Some(_) => 20.0,
        None => 50.0,
    };
    let verified = if record.verified { 10.0 } else { 0.0 };
    (base + verified).clamp(0.0, 100.0)
}

fn economics_score(record: &ProgramRecord, benchmarks: &CategoryBenchmarks) -> f64 {
    let rate = (record.commission_rate_low + record.commission_rate_high) / 2.0;
    let ratio = if benchmarks.avg_commission_rate > 0.0 {
        rate / benchmarks.avg_commission_rate
    } else {
        1.0
    };
    let mut score: f64 = if ratio >= 2.0 {
        90.0
    } else if ratio >= 1.5 {
        80.0
    } else if ratio >= 1.0 {
        65.0
    } else if ratio >= 0.7 {
        50.0
    } else if ratio >= 0.3 {
        35.0
    } else {
        20.0
    };

    match record.refund_rate {
        Some(r) if r <= 0.06 => score += 8.0,
        Some(r) if r > 0.15 => score -= 10.0,
        _ => {}
    }
    match record.cookie_days {
        Some(d) if d >= 60 => score += 5.0,
        Some(d) if d <= 7 => score -= 5.0,
        _ => {}
    }

    score.clamp(0.0, 100.0)
}

fn risk_score(record: &ProgramRecord) -> f64 {
    let mut risk: f64 = 0.2;
    match record.merchant_rating {
        Some(r) if r < 3.0 => risk += 0.3,
        None => risk += 0.2,
        _ => {}
    }
    if record.refund_rate.unwrap_or(0.0) > 0.15 {
        risk += 0.2;
    }
    if !record.verified {
        risk += 0.15;
    }
    if record.paused {
        risk += 0.25;
    }
    risk.clamp(0.0, 1.0)
}

fn populated_fields(record: &ProgramRecord) -> u32 {
    2 // id and the rate range are always present
        + record.network.is_some() as u32
        + record.brand.is_some() as u32
        + record.merchant_rating.is_some() as u32
        + record.review_count.is_some() as u32
        + record.cookie_days.is_some() as u32
        + record.conversion_rate.is_some() as u32
        + record.avg_order_value.is_some() as u32
        + record.refund_rate.is_some() as u32
        + record.trend_score.is_some() as u32
        + record.price.is_some() as u32
        + record.category.is_some() as u32
}

fn detect_stops(record: &ProgramRecord) -> Vec<HardStop> {
    let mut stops = Vec::new();
    if let Some(rating) = record.merchant_rating {
        if rating < MERCHANT_RATING_FLOOR {
            stops.push(HardStop::MerchantTrustCritical);
        }
    }
    if record.paused {
        stops.push(HardStop::ProgramPaused);
    }
    if record.refund_rate.unwrap_or(0.0) > REFUND_RATE_CEILING {
        stops.push(HardStop::RefundExcessive);
    }
    stops
}

fn price_band(record: &ProgramRecord, benchmarks: &CategoryBenchmarks) -> PriceBand {
    match record.price {
        Some(price) if benchmarks.avg_price > 0.0 => {
            let ratio = price / benchmarks.avg_price;
            if ratio < 0.7 {
                PriceBand::Budget
            } else if ratio <= 1.3 {
                PriceBand::Mid
            } else {
                PriceBand::Premium
            }
        }
        _ => PriceBand::Mid,
    }
}

/// Deterministically score one raw program record into a ranker candidate
pub fn score_program(record: &ProgramRecord, benchmarks: &CategoryBenchmarks) -> RankerCandidate {
    let fields = populated_fields(record);
    let confidence = if fields >= 9 {
        ConfidenceLevel::High
    } else if fields >= 6 {
        ConfidenceLevel::Med
    } else {
        ConfidenceLevel::Low
    };
    // 13 trackable fields per record
    let coverage = (fields as f64 / 13.0 * 100.0).clamp(0.0, 100.0);

    RankerCandidate {
        id: record.id.clone(),
        program_name: record.program_name.clone(),
        network: record.network.clone(),
        brand: record.brand.clone(),
        viability: viability_score(record),
        offer_merchant: merchant_score(record),
        economics: economics_score(record, benchmarks),
        commission_rate: (record.commission_rate_low + record.commission_rate_high) / 2.0,
        cookie_days: record.cookie_days,
        conversion_rate: record.conversion_rate,
        avg_order_value: record.avg_order_value,
        refund_rate: record.refund_rate,
        coverage,
        confidence,
        hard_stops: detect_stops(record),
        risk_score: risk_score(record),
        trend_score: record.trend_score,
        price_band: price_band(record, benchmarks),
    }
}
