//! The orchestrator: sequences the pipeline for one analysis request
//!
//! All evaluation stages are synchronous pure calls; the only awaits are
//! the collaborator inputs and the persistence writes. Reputation and
//! commission lookups are independent and run concurrently; both complete
//! before scoring. Sessions never share mutable state, so no locks exist
//! at this level.

use crate::collaborators::{
    first_resolved, BoxFuture, CandidateSource, CommissionSource, ProductSource,
    ReputationSource, SessionStore,
};
use crate::playbook::{PlaybookGenerator, PlaybookInput, PlaybookResponse, PlaybookSubject};
use chrono::Utc;
use offerlens_core::{
    normalize_url, AnalysisSnapshot, AnalyzeResponse, CommissionData, EconomicsSection, Insights,
    RankMode, RankerCandidate, Recommendations, RerankResponse, RoutingDecision, ScenarioInputs,
    SessionStatus, UserContext, VerifierError, VerifierSession,
};
use offerlens_ranking::{bucketize, rank, rerank_with_mode, score_program, BucketConfig};
use offerlens_scoring::economics::CLICKS_BASE;
use offerlens_scoring::{
    compute_coverage, compute_scores, earning_band, evaluate_confidence, resolve_benchmarks,
    sensitivity,
};
use offerlens_verdict::{detect_hard_stops, route, VerdictEngine};
use std::sync::Arc;
use uuid::Uuid;

/// Bucket size cap used for every decision set
const ITEMS_PER_BUCKET: usize = 3;

/// Constructor-injected pipeline front door
pub struct Orchestrator {
    products: Arc<dyn ProductSource>,
    reputation: Arc<dyn ReputationSource>,
    commissions: Arc<dyn CommissionSource>,
    candidates: Arc<dyn CandidateSource>,
    playbooks: Arc<dyn PlaybookGenerator>,
    sessions: Arc<dyn SessionStore>,
    verdict_engine: VerdictEngine,
}

impl Orchestrator {
    pub fn new(
        products: Arc<dyn ProductSource>,
        reputation: Arc<dyn ReputationSource>,
        commissions: Arc<dyn CommissionSource>,
        candidates: Arc<dyn CandidateSource>,
        playbooks: Arc<dyn PlaybookGenerator>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            products,
            reputation,
            commissions,
            candidates,
            playbooks,
            sessions,
            verdict_engine: VerdictEngine::default(),
        }
    }

    /// Run a full analysis for one listing URL.
    ///
    /// URL validation happens before session creation; a scrape failure
    /// marks the session failed with no partial snapshot. Missing
    /// reputation or commission data is degradation, not failure.
    pub async fn analyze(
        &self,
        url: &str,
        user: UserContext,
    ) -> Result<AnalyzeResponse, VerifierError> {
        let normalized = normalize_url(url)?;
        let mut session = VerifierSession::new(url, &normalized, user);
        tracing::info!(session = %session.id, url = %normalized, "analysis started");
        self.sessions.put(&session).await;

        match self.run_stages(&mut session).await {
            Ok(response) => {
                self.sessions.put(&session).await;
                Ok(response)
            }
            Err(error) => {
                tracing::warn!(session = %session.id, %error, "analysis failed");
                let _ = session.transition(SessionStatus::Failed);
                self.sessions.put(&session).await;
                Err(error)
            }
        }
    }

    async fn run_stages(
        &self,
        session: &mut VerifierSession,
    ) -> Result<AnalyzeResponse, VerifierError> {
        let product = self
            .products
            .fetch(&session.normalized_url)
            .await
            .map_err(|e| VerifierError::ScrapeFailed(e.to_string()))?;

        // Independent lookups run concurrently; both must land before
        // scoring. Commission resolution is an ordered fallback: program
        // by brand, else by category.
        let reputation_key = product.brand.as_deref().or(product.seller_name.as_deref());
        let reputation_fut = async {
            match reputation_key {
                Some(key) => self.reputation.lookup(key).await,
                None => None,
            }
        };
        let commission_fut = async {
            let mut attempts: Vec<BoxFuture<'_, Option<CommissionData>>> = Vec::new();
            if let Some(brand) = product.brand.as_deref() {
                attempts.push(self.commissions.by_brand(brand));
            }
            if let Some(category) = product.category.as_deref() {
                attempts.push(self.commissions.by_category(category));
            }
            first_resolved(attempts).await
        };
        let (reputation, commission) = tokio::join!(reputation_fut, commission_fut);

        let benchmarks = resolve_benchmarks(product.category.as_deref());

        // Stage 1: pillar scores
        let user_categories = (!session.user.affinity_categories.is_empty())
            .then(|| session.user.affinity_categories.as_slice());
        let scores = compute_scores(
            &product,
            reputation.as_ref(),
            commission.as_ref(),
            &benchmarks,
            user_categories,
        );

        // Stage 2: confidence
        let confidence = evaluate_confidence(&product, reputation.as_ref(), commission.as_ref());

        // Candidate supply degradation is data absence, never an error
        let records = match self
            .candidates
            .load(product.category.as_deref(), product.brand.as_deref())
            .await
        {
            Ok(records) => records,
            Err(error) => {
                tracing::warn!(session = %session.id, %error, "candidate supply degraded");
                Vec::new()
            }
        };
        let pool: Vec<RankerCandidate> = records
            .iter()
            .map(|record| score_program(record, &benchmarks))
            .collect();

        // Stage 3: coverage
        let trend_available = pool.iter().any(|c| c.trend_score.is_some());
        let coverage = compute_coverage(
            &product,
            reputation.as_ref(),
            commission.as_ref(),
            trend_available,
        );

        // Economics: earning band plus sensitivity scenarios
        let band = earning_band(&product, commission.as_ref(), &benchmarks);
        let scenario_inputs = ScenarioInputs {
            conversion_rate: commission
                .as_ref()
                .and_then(|c| c.conversion_rate)
                .unwrap_or(benchmarks.avg_conversion_rate),
            avg_order_value: commission
                .as_ref()
                .and_then(|c| c.avg_order_value)
                .or(product.price.amount)
                .unwrap_or(benchmarks.avg_order_value),
            refund_rate: commission
                .as_ref()
                .and_then(|c| c.refund_rate)
                .unwrap_or(benchmarks.avg_refund_rate),
            commission_rate: commission
                .as_ref()
                .map(|c| c.rate_mid())
                .unwrap_or(benchmarks.avg_commission_rate),
            commission_range: commission.as_ref().map(|c| (c.rate_low, c.rate_high)),
            monthly_clicks: session
                .user
                .monthly_clicks
                .map(f64::from)
                .unwrap_or(CLICKS_BASE as f64),
        };
        let sensitivity_report = sensitivity(&scenario_inputs);

        // Stage 4: verdict, with the degradations spelled out
        let hard_stops = detect_hard_stops(&product, reputation.as_ref(), commission.as_ref());
        let mut assumptions = Vec::new();
        if reputation.is_none() {
            assumptions
                .push("no merchant reputation found; trust components use neutral defaults".to_string());
        }
        if commission.is_none() {
            assumptions.push(format!(
                "no program terms found; economics assume the '{}' category benchmark",
                benchmarks.category
            ));
        }
        if let Some(clicks) = session.user.monthly_clicks {
            assumptions.push(format!(
                "earnings scenarios use your estimate of {} monthly clicks",
                clicks
            ));
        }
        let verdict =
            self.verdict_engine
                .evaluate(&scores, confidence.level, hard_stops, assumptions);

        // Stage 5: routing
        let routing = route(
            &verdict,
            &scores,
            confidence.level,
            coverage.score,
            session.user.preferred_mode,
        );

        // Stages 6-7: rank and bucket
        let outcome = rank(&pool, routing.mode, Some(&benchmarks));
        let decision = bucketize(
            &outcome,
            &BucketConfig {
                items_per_bucket: ITEMS_PER_BUCKET,
                show_trending: routing.show_trending,
                strategy: routing.strategy,
            },
        );

        let insights = Insights {
            top_pros: verdict.top_pros.clone(),
            top_risks: verdict.top_risks.clone(),
            key_assumptions: verdict.key_assumptions.clone(),
        };
        let snapshot = AnalysisSnapshot {
            product,
            scores: scores.totals(),
            score_breakdowns: scores.breakdowns,
            confidence,
            verdict,
            insights,
            economics: EconomicsSection {
                earning_band: band,
                sensitivity: sensitivity_report,
            },
            coverage,
        };
        let recommendations = Recommendations {
            mode: routing.mode,
            routing,
            winner: decision.winner,
            buckets: decision.buckets,
            total_candidates: decision.total_candidates,
            can_rerank: true,
        };

        session.snapshot = Some(snapshot.clone());
        session.recommendations = Some(recommendations.clone());
        session.candidate_pool = pool;
        session.transition(SessionStatus::RecommendationsReady)?;

        Ok(AnalyzeResponse {
            session_id: session.id,
            status: session.status,
            snapshot,
            recommendations,
        })
    }

    /// Re-rank the cached candidate pool under a different mode.
    ///
    /// Pure re-application of the ranking and bucketing stages: no
    /// re-scrape, no re-scoring of the base product, no snapshot change.
    pub async fn rerank(
        &self,
        session_id: Uuid,
        mode: RankMode,
    ) -> Result<RerankResponse, VerifierError> {
        let mut session = self
            .sessions
            .get(session_id)
            .await
            .ok_or(VerifierError::SessionNotFound(session_id))?;

        if !matches!(
            session.status,
            SessionStatus::RecommendationsReady | SessionStatus::PlaybookReady
        ) {
            return Err(VerifierError::RerankUnavailable(session.status));
        }

        let category = session
            .snapshot
            .as_ref()
            .and_then(|s| s.product.category.clone());
        let benchmarks = resolve_benchmarks(category.as_deref());

        let outcome = rerank_with_mode(&session.candidate_pool, mode, Some(&benchmarks));

        let previous = session.recommendations.as_ref().map(|r| r.routing);
        let routing = RoutingDecision {
            mode,
            show_trending: previous.map(|r| r.show_trending).unwrap_or(true),
            strategy: previous.map(|r| r.strategy).unwrap_or_default(),
        };
        let decision = bucketize(
            &outcome,
            &BucketConfig {
                items_per_bucket: ITEMS_PER_BUCKET,
                show_trending: routing.show_trending,
                strategy: routing.strategy,
            },
        );

        session.recommendations = Some(Recommendations {
            mode,
            routing,
            winner: decision.winner.clone(),
            buckets: decision.buckets.clone(),
            total_candidates: decision.total_candidates,
            can_rerank: true,
        });
        session.updated_at = Utc::now();
        self.sessions.put(&session).await;

        Ok(RerankResponse {
            mode,
            winner: decision.winner,
            buckets: decision.buckets,
            total_candidates: decision.total_candidates,
        })
    }

    /// Generate a playbook for the original product or one selected
    /// alternative, moving the session to `playbook_ready`.
    pub async fn build_playbook(
        &self,
        session_id: Uuid,
        alternative_id: Option<&str>,
    ) -> Result<PlaybookResponse, VerifierError> {
        let mut session = self
            .sessions
            .get(session_id)
            .await
            .ok_or(VerifierError::SessionNotFound(session_id))?;

        let input = {
            let snapshot = session
                .snapshot
                .as_ref()
                .ok_or_else(|| VerifierError::PlaybookFailed("analysis not complete".to_string()))?;
            let subject = match alternative_id {
                Some(id) => {
                    let candidate = session
                        .candidate_pool
                        .iter()
                        .find(|c| c.id == id)
                        .cloned()
                        .ok_or_else(|| {
                            VerifierError::PlaybookFailed(format!("unknown alternative: {}", id))
                        })?;
                    PlaybookSubject::Alternative { candidate }
                }
                None => PlaybookSubject::Product {
                    product: snapshot.product.clone(),
                },
            };
            PlaybookInput {
                subject,
                pros: snapshot.insights.top_pros.clone(),
                risks: snapshot.insights.top_risks.clone(),
                assumptions: snapshot.insights.key_assumptions.clone(),
            }
        };

        let playbook = self.playbooks.generate(&input).await?;

        match session.status {
            SessionStatus::RecommendationsReady => {
                session.transition(SessionStatus::PlaybookReady)?
            }
            SessionStatus::PlaybookReady => {}
            other => {
                return Err(VerifierError::InvalidTransition {
                    from: other,
                    to: SessionStatus::PlaybookReady,
                })
            }
        }
        self.sessions.put(&session).await;

        Ok(PlaybookResponse {
            session_id: session.id,
            status: session.status,
            playbook,
        })
    }

    /// Archive the session to the user's watchlist, its terminal state
    pub async fn archive_to_watchlist(
        &self,
        session_id: Uuid,
    ) -> Result<SessionStatus, VerifierError> {
        let mut session = self
            .sessions
            .get(session_id)
            .await
            .ok_or(VerifierError::SessionNotFound(session_id))?;
        session.transition(SessionStatus::Completed)?;
        self.sessions.put(&session).await;
        Ok(session.status)
    }

    /// Fetch a session aggregate by id
    pub async fn session(&self, session_id: Uuid) -> Result<VerifierSession, VerifierError> {
        self.sessions
            .get(session_id)
            .await
            .ok_or(VerifierError::SessionNotFound(session_id))
    }
}
