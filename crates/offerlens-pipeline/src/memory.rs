//! In-memory reference collaborators
//!
//! These stay intentionally small and deterministic. They act as defaults
//! so the pipeline can run and be tested without any network adapter;
//! deployments are expected to replace them.

use crate::collaborators::{
    BoxFuture, CandidateSource, CommissionSource, ProductSource, ReputationSource, SessionStore,
};
use crate::playbook::{Playbook, PlaybookGenerator, PlaybookInput, PlaybookStep, PlaybookSubject};
use offerlens_core::{
    CommissionData, ProgramRecord, ReputationData, ScrapedProduct, VerifierError,
    VerifierSession,
};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Product fixtures keyed by normalized URL
#[derive(Default)]
pub struct StaticProductSource {
    products: HashMap<String, ScrapedProduct>,
}

impl StaticProductSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_product(mut self, normalized_url: &str, product: ScrapedProduct) -> Self {
        self.products.insert(normalized_url.to_string(), product);
        self
    }
}

impl ProductSource for StaticProductSource {
    fn fetch<'a>(&'a self, url: &'a str) -> BoxFuture<'a, Result<ScrapedProduct, VerifierError>> {
        Box::pin(async move {
            self.products
                .get(url)
                .cloned()
                .ok_or_else(|| VerifierError::ScrapeFailed(format!("no listing at {}", url)))
        })
    }
}

/// Reputation fixtures keyed by lowercased brand or seller name
#[derive(Default)]
pub struct StaticReputationSource {
    by_key: HashMap<String, ReputationData>,
}

impl StaticReputationSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reputation(mut self, key: &str, reputation: ReputationData) -> Self {
        self.by_key.insert(key.to_lowercase(), reputation);
        self
    }
}

impl ReputationSource for StaticReputationSource {
    fn lookup<'a>(&'a self, key: &'a str) -> BoxFuture<'a, Option<ReputationData>> {
        Box::pin(async move { self.by_key.get(&key.to_lowercase()).cloned() })
    }
}

/// Commission fixtures with separate brand and category indexes
#[derive(Default)]
pub struct StaticCommissionSource {
    by_brand: HashMap<String, CommissionData>,
    by_category: HashMap<String, CommissionData>,
}

impl StaticCommissionSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_brand_terms(mut self, brand: &str, terms: CommissionData) -> Self {
        self.by_brand.insert(brand.to_lowercase(), terms);
        self
    }

    pub fn with_category_terms(mut self, category: &str, terms: CommissionData) -> Self {
        self.by_category.insert(category.to_lowercase(), terms);
        self
    }
}

impl CommissionSource for StaticCommissionSource {
    fn by_brand<'a>(&'a self, brand: &'a str) -> BoxFuture<'a, Option<CommissionData>> {
        Box::pin(async move { self.by_brand.get(&brand.to_lowercase()).cloned() })
    }

    fn by_category<'a>(&'a self, category: &'a str) -> BoxFuture<'a, Option<CommissionData>> {
        Box::pin(async move { self.by_category.get(&category.to_lowercase()).cloned() })
    }
}

/// Candidate fixtures keyed by category, with a default pool
#[derive(Default)]
pub struct StaticCandidateSource {
    by_category: HashMap<String, Vec<ProgramRecord>>,
    default_pool: Vec<ProgramRecord>,
}

impl StaticCandidateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category_pool(mut self, category: &str, records: Vec<ProgramRecord>) -> Self {
        self.by_category.insert(category.to_lowercase(), records);
        self
    }

    pub fn with_default_pool(mut self, records: Vec<ProgramRecord>) -> Self {
        self.default_pool = records;
        self
    }
}

impl CandidateSource for StaticCandidateSource {
    fn load<'a>(
        &'a self,
        category: Option<&'a str>,
        exclude_brand: Option<&'a str>,
    ) -> BoxFuture<'a, Result<Vec<ProgramRecord>, VerifierError>> {
        Box::pin(async move {
            let pool = category
                .and_then(|c| self.by_category.get(&c.to_lowercase()))
                .unwrap_or(&self.default_pool);

            Ok(pool
                .iter()
                .filter(|record| match (exclude_brand, record.brand.as_deref()) {
                    (Some(excluded), Some(brand)) => !brand.eq_ignore_ascii_case(excluded),
                    _ => true,
                })
                .cloned()
                .collect())
        })
    }
}

/// Deterministic reference playbook generator
#[derive(Default)]
pub struct OutlinePlaybook;

impl PlaybookGenerator for OutlinePlaybook {
    fn generate<'a>(
        &'a self,
        input: &'a PlaybookInput,
    ) -> BoxFuture<'a, Result<Playbook, VerifierError>> {
        Box::pin(async move {
            let subject_name = match &input.subject {
                PlaybookSubject::Product { product } => product
                    .title
                    .clone()
                    .unwrap_or_else(|| "the product".to_string()),
                PlaybookSubject::Alternative { candidate } => candidate.program_name.clone(),
            };

            let mut steps = vec![PlaybookStep {
                order: 1,
                action: format!("Join the affiliate program for {}", subject_name),
                rationale: None,
            }];
            for (index, risk) in input.risks.iter().take(3).enumerate() {
                steps.push(PlaybookStep {
                    order: (index + 2) as u32,
                    action: format!("Mitigate: {}", risk),
                    rationale: None,
                });
            }
            steps.push(PlaybookStep {
                order: (steps.len() + 1) as u32,
                action: "Set up tracked links and publish the first placement".to_string(),
                rationale: input.pros.first().cloned(),
            });

            Ok(Playbook {
                title: format!("Launch plan: {}", subject_name),
                steps,
            })
        })
    }
}

/// Session store backed by a shared map, one entry per session id
#[derive(Default)]
pub struct InMemorySessionStore {
    inner: RwLock<HashMap<Uuid, VerifierSession>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn put<'a>(&'a self, session: &'a VerifierSession) -> BoxFuture<'a, ()> {
        Box::pin(async move {
            self.inner
                .write()
                .await
                .insert(session.id, session.clone());
        })
    }

    fn get<'a>(&'a self, id: Uuid) -> BoxFuture<'a, Option<VerifierSession>> {
        Box::pin(async move { self.inner.read().await.get(&id).cloned() })
    }
}
