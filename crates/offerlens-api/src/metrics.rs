//! Prometheus counters for the API surface
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};

pub struct ApiMetrics {
    registry: Registry,
    pub analyses_total: IntCounter,
    pub analyses_failed: IntCounter,
    pub reranks_total: IntCounter,
    pub playbooks_total: IntCounter,
}

impl ApiMetrics {
    pub fn new() -> Self {
        let registry = Registry::new();
        Self {
            analyses_total: counter(
                &registry,
                "offerlens_analyses_total",
                "Analysis requests received",
            ),
            analyses_failed: counter(
                &registry,
                "offerlens_analyses_failed_total",
                "Analysis requests that ended in error",
            ),
            reranks_total: counter(
                &registry,
                "offerlens_reranks_total",
                "Rerank requests received",
            ),
            playbooks_total: counter(
                &registry,
                "offerlens_playbooks_total",
                "Playbook requests received",
            ),
            registry,
        }
    }

    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).to_string())
    }
}

impl Default for ApiMetrics {
    fn default() -> Self {
        Self::new()
    }
}

fn counter(registry: &Registry, name: &str, help: &str) -> IntCounter {
    let counter = IntCounter::new(name, help).expect("counter definition");
    registry
        .register(Box::new(counter.clone()))
        .expect("counter registration");
    counter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_appear_in_exposition() {
        let metrics = ApiMetrics::new();
        metrics.analyses_total.inc();
        metrics.reranks_total.inc();
        let text = metrics.encode().unwrap();
        assert!(text.contains("offerlens_analyses_total 1"));
        assert!(text.contains("offerlens_reranks_total 1"));
        assert!(text.contains("offerlens_playbooks_total 0"));
    }
}
