//! Earning band projection and economics sensitivity analysis

use offerlens_core::{
    CategoryBenchmarks, CommissionData, EarningBand, EarningScenario, EconomicsDriver, Fragility,
    ScenarioInputs, ScenarioKind, ScrapedProduct, SensitivityReport,
};

/// Assumed monthly click range when the caller supplies no estimate
pub const CLICKS_LOW: u32 = 500;
pub const CLICKS_BASE: u32 = 1250;
pub const CLICKS_HIGH: u32 = 2000;

/// Net target the breakeven question is asked against
const BREAKEVEN_TARGET: f64 = 100.0;
/// Monthly clicks beyond this are flagged unrealistic for a single listing
const BREAKEVEN_CLICK_CEILING: f64 = 10_000.0;

fn net_earnings(clicks: f64, conversion: f64, aov: f64, rate: f64, refund: f64) -> f64 {
    let orders = clicks * conversion;
    let gross = orders * aov;
    gross * rate * (1.0 - refund)
}

/// Project the monthly earnings band for one listing.
///
/// The low bound pairs the low commission rate with the low click count and
/// the high bound pairs the high rate with the high count, so the band is
/// deliberately wide.
pub fn earning_band(
    product: &ScrapedProduct,
    commission: Option<&CommissionData>,
    benchmarks: &CategoryBenchmarks,
) -> EarningBand {
    let rate_low = commission
        .map(|c| c.rate_low)
        .unwrap_or(benchmarks.avg_commission_rate);
    let rate_high = commission
        .map(|c| c.rate_high)
        .unwrap_or(benchmarks.avg_commission_rate);
    let rate_mid = (rate_low + rate_high) / 2.0;

    let conversion = commission
        .and_then(|c| c.conversion_rate)
        .unwrap_or(benchmarks.avg_conversion_rate);
    let aov = commission
        .and_then(|c| c.avg_order_value)
        .or(product.price.amount)
        .unwrap_or(benchmarks.avg_order_value);
    let refund = commission
        .and_then(|c| c.refund_rate)
        .unwrap_or(benchmarks.avg_refund_rate)
        .clamp(0.0, 1.0);

    EarningBand {
        low: net_earnings(CLICKS_LOW as f64, conversion, aov, rate_low, refund),
        base: net_earnings(CLICKS_BASE as f64, conversion, aov, rate_mid, refund),
        high: net_earnings(CLICKS_HIGH as f64, conversion, aov, rate_high, refund),
        clicks_low: CLICKS_LOW,
        clicks_high: CLICKS_HIGH,
    }
}

#[derive(Clone)]
struct Factors {
    conversion: f64,
    aov: f64,
    refund: f64,
    rate: f64,
}

fn scenario(kind: ScenarioKind, clicks: f64, f: &Factors) -> EarningScenario {
    let orders = clicks * f.conversion;
    let gross_revenue = orders * f.aov;
    let gross_commission = gross_revenue * f.rate;
    EarningScenario {
        kind,
        conversion_rate: f.conversion,
        avg_order_value: f.aov,
        refund_rate: f.refund,
        commission_rate: f.rate,
        orders,
        gross_revenue,
        gross_commission,
        net: gross_commission * (1.0 - f.refund),
    }
}

/// Pessimistic/base/optimistic earnings scenarios plus a fragility
/// classification and the ranked swing drivers.
pub fn sensitivity(inputs: &ScenarioInputs) -> SensitivityReport {
    // Sanitize: rates are fractions, clicks non-negative
    let conversion = inputs.conversion_rate.clamp(0.0, 1.0);
    let refund = inputs.refund_rate.clamp(0.0, 1.0);
    let aov = inputs.avg_order_value.max(0.0);
    let rate = inputs.commission_rate.max(0.0);
    let clicks = inputs.monthly_clicks.max(0.0);

    let (range_low, range_high) = inputs
        .commission_range
        .map(|(low, high)| (low.max(0.0).min(rate), high.max(rate)))
        .unwrap_or((rate, rate));

    let base = Factors {
        conversion,
        aov,
        refund,
        rate,
    };
    // Caps are floored at the base value so a degenerate input can never
    // invert the scenario ordering.
    let pessimistic = Factors {
        conversion: conversion * 0.5,
        aov: aov * 0.8,
        refund: (refund * 1.5).min(0.3).max(refund),
        rate: range_low,
    };
    let optimistic = Factors {
        conversion: (conversion * 1.5).min(0.1).max(conversion),
        aov: aov * 1.2,
        refund: refund * 0.5,
        rate: range_high,
    };

    let scenarios = vec![
        scenario(ScenarioKind::Pessimistic, clicks, &pessimistic),
        scenario(ScenarioKind::Base, clicks, &base),
        scenario(ScenarioKind::Optimistic, clicks, &optimistic),
    ];

    let pess_net = scenarios[0].net;
    let base_net = scenarios[1].net;
    let opt_net = scenarios[2].net;

    let fragility = if base_net <= 0.0 {
        // Spread over nothing: treat as maximally fragile
        Fragility::Fragile
    } else {
        let spread = (opt_net - pess_net) / base_net;
        if spread > 2.0 {
            Fragility::Fragile
        } else if spread > 1.0 {
            Fragility::Moderate
        } else {
            Fragility::Stable
        }
    };

    // Swing each factor alone between its pessimistic and optimistic value
    let net_with = |f: &Factors| net_earnings(clicks, f.conversion, f.aov, f.rate, f.refund);
    let mut drivers = vec![
        (
            EconomicsDriver::Commission,
            (net_with(&Factors { rate: optimistic.rate, ..base.clone() })
                - net_with(&Factors { rate: pessimistic.rate, ..base.clone() }))
            .abs(),
        ),
        (
            EconomicsDriver::Conversion,
            (net_with(&Factors { conversion: optimistic.conversion, ..base.clone() })
                - net_with(&Factors { conversion: pessimistic.conversion, ..base.clone() }))
            .abs(),
        ),
        (
            EconomicsDriver::OrderValue,
            (net_with(&Factors { aov: optimistic.aov, ..base.clone() })
                - net_with(&Factors { aov: pessimistic.aov, ..base.clone() }))
            .abs(),
        ),
        (
            EconomicsDriver::Refund,
            (net_with(&Factors { refund: optimistic.refund, ..base.clone() })
                - net_with(&Factors { refund: pessimistic.refund, ..base.clone() }))
            .abs(),
        ),
    ];
    // Stable sort keeps the declaration order on ties, so ranking is
    // deterministic for degenerate inputs too.
    drivers.sort_by(|a, b| b.1.total_cmp(&a.1));

    let per_click = conversion * aov * rate * (1.0 - refund);
    let breakeven_clicks = if per_click > 0.0 {
        BREAKEVEN_TARGET / per_click
    } else {
        f64::INFINITY
    };

    SensitivityReport {
        scenarios,
        fragility,
        key_drivers: drivers.into_iter().map(|(d, _)| d).collect(),
        breakeven_clicks,
        breakeven_unrealistic: breakeven_clicks > BREAKEVEN_CLICK_CEILING,
    }
}
