//! OfferLens Scoring: pillar scores, confidence, coverage, economics
//!
//! Everything in this crate is a pure, synchronous, CPU-only transform.
//! Missing evidence never errors; each rule substitutes its documented
//! neutral default and the gap shows up in confidence and coverage instead.

pub mod benchmarks;
pub mod confidence;
pub mod coverage;
pub mod economics;
pub mod engine;

pub use benchmarks::resolve_benchmarks;
pub use confidence::evaluate_confidence;
pub use coverage::{checklist_score, compute_coverage};
pub use economics::{earning_band, sensitivity};
pub use engine::compute_scores;
