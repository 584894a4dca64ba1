//! OfferLens Ranking: mode-weighted ranking and bucketing of alternatives
//!
//! Ranking is a pure map-then-sort: no candidate's score depends on another
//! candidate, and the tie-break chain is a total order, so the same input
//! produces the same output on every invocation. `rerank_with_mode` is the
//! identical computation re-applied; it must never touch I/O.

pub mod buckets;
pub mod candidates;
pub mod ranker;
pub mod weights;

pub use buckets::{bucketize, BucketConfig};
pub use candidates::score_program;
pub use ranker::{rank, rank_with_weights, rerank_with_mode, RankOutcome};
pub use weights::RankWeights;
