//! OfferLens Verdict: hard stops, the verdict engine, and intent routing
//!
//! The verdict is computed fresh per analysis, a single evaluation with no
//! transitions. Hard stops win unconditionally; everything else is a
//! threshold table over the pillar totals and the confidence level, so
//! every outcome can be traced back to a number.

pub mod engine;
pub mod hard_stops;
pub mod router;

pub use engine::{VerdictEngine, VerdictThresholds};
pub use hard_stops::detect_hard_stops;
pub use router::route;
