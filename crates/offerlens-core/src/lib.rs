//! OfferLens Core: shared data model, session lifecycle, and error taxonomy
//!
//! Every crate in the workspace exchanges data through the records defined
//! here. Evidence records keep one `Option<T>` per nullable field so that
//! each "missing data → neutral default" branch is an explicit match, not a
//! runtime surprise.

pub mod economics;
pub mod error;
pub mod evidence;
pub mod fallback;
pub mod ident;
pub mod product;
pub mod ranking;
pub mod score;
pub mod session;
pub mod verdict;

pub use economics::{
    EarningBand, EarningScenario, EconomicsDriver, Fragility, ScenarioInputs, ScenarioKind,
    SensitivityReport,
};
pub use error::VerifierError;
pub use evidence::{CategoryBenchmarks, CommissionData, ReputationData, SourceRating};
pub use ident::{canonical_key, normalize_url};
pub use product::{Availability, Price, ScrapedProduct};
pub use ranking::{
    BrandTier, Bucket, BucketKind, BucketStrategy, DecisionSet, PriceBand, ProgramRecord,
    RankMode, RankedAlternative, RankerCandidate, RoutingDecision,
};
pub use score::{
    ConfidenceLevel, ConfidenceResult, CoverageChecklist, CoverageResult, EvidenceSource, Pillar,
    PillarBreakdown, PillarTotals, ScoreComponent, ScoreResult, SourceAgreement, SourceClass,
};
pub use session::{
    AnalysisSnapshot, AnalyzeRequest, AnalyzeResponse, EconomicsSection, Insights,
    PlaybookRequest, Recommendations, RerankRequest, RerankResponse, SessionStatus, UserContext,
    VerifierSession, WatchlistRequest,
};
pub use verdict::{HardStop, VerdictResult, VerdictStatus};

/// Engine version advertised by the API health endpoint
pub const ENGINE_VERSION: &str = "0.4.0";
