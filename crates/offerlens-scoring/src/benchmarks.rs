//! Category benchmark resolution
//!
//! Every economics ratio is measured against the category's averages. The
//! resolver never fails: exact category, then substring match, then the
//! global default bucket.

use offerlens_core::fallback::{first_some, Attempt};
use offerlens_core::CategoryBenchmarks;
use once_cell::sync::Lazy;

fn bench(
    category: &str,
    commission: f64,
    cookie: f64,
    conversion: f64,
    order_value: f64,
    refund: f64,
    reviews: f64,
    price: f64,
) -> CategoryBenchmarks {
    CategoryBenchmarks {
        category: category.to_string(),
        avg_commission_rate: commission,
        avg_cookie_days: cookie,
        avg_conversion_rate: conversion,
        avg_order_value: order_value,
        avg_refund_rate: refund,
        avg_review_count: reviews,
        avg_price: price,
    }
}

/// Global bucket used when the category is unrecognized
static DEFAULT_BUCKET: Lazy<CategoryBenchmarks> =
    Lazy::new(|| bench("general", 0.06, 30.0, 0.02, 55.0, 0.08, 180.0, 45.0));

/// Calibrated category rows. Values are tuned against observed network
/// averages, not contractual.
static CATEGORY_TABLE: Lazy<Vec<CategoryBenchmarks>> = Lazy::new(|| {
    vec![
        bench("electronics", 0.04, 14.0, 0.018, 95.0, 0.09, 450.0, 80.0),
        bench("home & kitchen", 0.07, 30.0, 0.022, 60.0, 0.06, 300.0, 40.0),
        bench("beauty", 0.10, 30.0, 0.028, 38.0, 0.07, 260.0, 28.0),
        bench("fashion", 0.09, 21.0, 0.020, 52.0, 0.16, 200.0, 45.0),
        bench("sports & outdoors", 0.07, 30.0, 0.019, 58.0, 0.07, 220.0, 55.0),
        bench("toys & games", 0.06, 30.0, 0.024, 35.0, 0.05, 310.0, 30.0),
        bench("pet supplies", 0.08, 30.0, 0.026, 42.0, 0.05, 280.0, 33.0),
        bench("software", 0.20, 60.0, 0.015, 70.0, 0.10, 120.0, 60.0),
        bench("health & household", 0.08, 30.0, 0.025, 34.0, 0.06, 340.0, 26.0),
    ]
});

fn exact_match(category: &str) -> Option<CategoryBenchmarks> {
    CATEGORY_TABLE
        .iter()
        .find(|b| b.category.eq_ignore_ascii_case(category))
        .cloned()
}

/// Substring match for scraped breadcrumbs like "Electronics > Headphones"
fn partial_match(category: &str) -> Option<CategoryBenchmarks> {
    let lower = category.to_lowercase();
    CATEGORY_TABLE
        .iter()
        .find(|b| lower.contains(&b.category) || b.category.contains(&lower))
        .cloned()
}

/// Resolve benchmarks for a scraped category string, falling back to the
/// global default bucket.
pub fn resolve_benchmarks(category: Option<&str>) -> CategoryBenchmarks {
    let Some(category) = category.map(str::trim).filter(|c| !c.is_empty()) else {
        return DEFAULT_BUCKET.clone();
    };

    let attempts: Vec<Attempt<CategoryBenchmarks>> = vec![
        Box::new({
            let c = category.to_string();
            move || exact_match(&c)
        }),
        Box::new({
            let c = category.to_string();
            move || partial_match(&c)
        }),
    ];

    match first_some(attempts) {
        Some((_, found)) => found,
        None => DEFAULT_BUCKET.clone(),
    }
}
