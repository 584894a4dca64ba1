//! Property tests for ranking and bucketing.
//!
//! These run the ranker over generated candidate pools and check the
//! invariants that must hold for every input: determinism, the partition
//! property, winner eligibility, and weight-table independence.

use offerlens_core::{
    BucketStrategy, CategoryBenchmarks, ConfidenceLevel, HardStop, PriceBand, RankMode,
    RankerCandidate,
};
use offerlens_ranking::{bucketize, rank, rank_with_weights, rerank_with_mode, BucketConfig, RankWeights};
use std::collections::HashSet;

const MODES: [RankMode; 4] = [
    RankMode::Standard,
    RankMode::DemandFirst,
    RankMode::TrustFirst,
    RankMode::EconomicsFirst,
];

/// Deterministic pseudo-random pool; a small LCG keeps the fixture
/// reproducible without pulling in an RNG crate.
fn generated_pool(size: usize, seed: u64) -> Vec<RankerCandidate> {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 32) as u32 as f64 / u32::MAX as f64
    };

    (0..size)
        .map(|i| {
            let risk = next();
            let merchant_rating = 1.0 + next() * 4.0;
            RankerCandidate {
                id: format!("c{:03}", i),
                program_name: format!("Program {}", i),
                network: None,
                brand: None,
                viability: next() * 100.0,
                offer_merchant: next() * 100.0,
                economics: next() * 100.0,
                commission_rate: 0.02 + next() * 0.18,
                cookie_days: Some((next() * 90.0) as u32),
                conversion_rate: Some(next() * 0.05),
                avg_order_value: Some(10.0 + next() * 150.0),
                refund_rate: Some(next() * 0.3),
                coverage: next() * 100.0,
                confidence: match (next() * 3.0) as u32 {
                    0 => ConfidenceLevel::Low,
                    1 => ConfidenceLevel::Med,
                    _ => ConfidenceLevel::High,
                },
                hard_stops: if merchant_rating < 2.5 {
                    vec![HardStop::MerchantTrustCritical]
                } else {
                    vec![]
                },
                risk_score: risk,
                trend_score: (next() > 0.5).then(|| next()),
                price_band: match (next() * 3.0) as u32 {
                    0 => PriceBand::Budget,
                    1 => PriceBand::Mid,
                    _ => PriceBand::Premium,
                },
            }
        })
        .collect()
}

fn stats() -> CategoryBenchmarks {
    CategoryBenchmarks {
        category: "general".to_string(),
        avg_commission_rate: 0.06,
        avg_cookie_days: 30.0,
        avg_conversion_rate: 0.02,
        avg_order_value: 55.0,
        avg_refund_rate: 0.08,
        avg_review_count: 180.0,
        avg_price: 45.0,
    }
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_rerank_is_deterministic_across_modes_and_seeds() {
    for seed in [1, 7, 42, 1234] {
        let pool = generated_pool(40, seed);
        for mode in MODES {
            let first = rerank_with_mode(&pool, mode, Some(&stats()));
            let second = rerank_with_mode(&pool, mode, Some(&stats()));
            assert_eq!(first, second, "seed {} mode {}", seed, mode);
        }
    }
}

#[test]
fn test_ranking_ignores_input_order() {
    let pool = generated_pool(30, 99);
    let mut reversed = pool.clone();
    reversed.reverse();

    for mode in MODES {
        let forward = rank(&pool, mode, None);
        let backward = rank(&reversed, mode, None);
        let forward_ids: Vec<&str> =
            forward.ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        let backward_ids: Vec<&str> =
            backward.ranked.iter().map(|r| r.candidate.id.as_str()).collect();
        assert_eq!(forward_ids, backward_ids, "mode {}", mode);
    }
}

#[test]
fn test_rank_positions_are_contiguous() {
    let pool = generated_pool(25, 5);
    let outcome = rank(&pool, RankMode::Standard, None);
    for (index, alternative) in outcome.ranked.iter().enumerate() {
        assert_eq!(alternative.rank, index + 1);
    }
}

// =============================================================================
// Winner eligibility
// =============================================================================

#[test]
fn test_hard_stopped_candidates_never_win() {
    for seed in [3, 11, 77] {
        let pool = generated_pool(50, seed);
        for mode in MODES {
            let outcome = rank(&pool, mode, Some(&stats()));
            if let Some(winner) = &outcome.winner {
                assert!(winner.candidate.hard_stops.is_empty());
                assert!(winner.winner_eligible);
            }
            for alternative in &outcome.ranked {
                if !alternative.candidate.hard_stops.is_empty() {
                    assert!(!alternative.winner_eligible);
                    assert!(alternative.warning.is_some());
                }
            }
        }
    }
}

// =============================================================================
// Bucket partition
// =============================================================================

#[test]
fn test_bucket_partition_holds_for_every_configuration() {
    let configs = [
        BucketConfig::default(),
        BucketConfig {
            items_per_bucket: 1,
            show_trending: true,
            strategy: BucketStrategy::Balanced,
        },
        BucketConfig {
            items_per_bucket: 5,
            show_trending: false,
            strategy: BucketStrategy::Conservative,
        },
    ];

    for seed in [2, 13, 101] {
        let pool = generated_pool(60, seed);
        for mode in MODES {
            let outcome = rank(&pool, mode, None);
            for config in &configs {
                let set = bucketize(&outcome, config);

                let mut seen = HashSet::new();
                if let Some(winner) = &set.winner {
                    seen.insert(winner.candidate.id.clone());
                }
                for bucket in &set.buckets {
                    assert!(bucket.items.len() <= config.items_per_bucket);
                    for item in &bucket.items {
                        assert!(
                            seen.insert(item.candidate.id.clone()),
                            "{} in two groups (seed {}, mode {})",
                            item.candidate.id,
                            seed,
                            mode
                        );
                    }
                }
                assert_eq!(set.total_candidates, outcome.ranked.len());
            }
        }
    }
}

// =============================================================================
// Weight tables as configuration
// =============================================================================

#[test]
fn test_ranking_holds_under_alternative_weight_tables() {
    // The invariants must not depend on one particular tuning
    let tables = [
        RankWeights {
            viability: 1.0,
            offer_merchant: 0.0,
            economics: 0.0,
        },
        RankWeights {
            viability: 0.1,
            offer_merchant: 0.8,
            economics: 0.1,
        },
        RankWeights {
            viability: 0.4,
            offer_merchant: 0.2,
            economics: 0.4,
        },
    ];

    let pool = generated_pool(35, 21);
    for weights in tables {
        let outcome = rank_with_weights(&pool, &weights, None);
        let again = rank_with_weights(&pool, &weights, None);
        assert_eq!(outcome, again);

        // Composites are consistent with the table
        for alternative in &outcome.ranked {
            let expected = weights.viability * alternative.candidate.viability
                + weights.offer_merchant * alternative.candidate.offer_merchant
                + weights.economics * alternative.candidate.economics;
            assert!((alternative.composite - expected).abs() < 1e-9);
        }

        // Order is non-increasing in composite
        for pair in outcome.ranked.windows(2) {
            assert!(pair[0].composite >= pair[1].composite);
        }
    }
}

#[test]
fn test_yaml_loaded_table_matches_inline_table() {
    let yaml = "viability: 0.55\noffer_merchant: 0.20\neconomics: 0.25\n";
    let loaded = RankWeights::from_yaml(yaml).unwrap();
    assert_eq!(loaded, RankWeights::for_mode(RankMode::DemandFirst));

    let pool = generated_pool(20, 8);
    assert_eq!(
        rank_with_weights(&pool, &loaded, None),
        rank(&pool, RankMode::DemandFirst, None)
    );
}
