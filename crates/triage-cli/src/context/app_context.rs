use std::sync::Arc;

use anyhow::Context;
use triage_config::TriageConfig;
use triage_engine::{SynonymExtractor, TriageEngine};

/// Everything a command handler needs, built once per invocation.
pub struct AppContext {
    pub config: TriageConfig,
    pub engine: Arc<TriageEngine>,
    pub extractor: SynonymExtractor,
}

impl AppContext {
    pub fn init(config: TriageConfig) -> anyhow::Result<Self> {
        let engine = TriageEngine::from_config(&config).with_context(|| {
            if config.knowledge.is_configured() {
                format!("failed to load knowledge base from {}", config.knowledge.dir)
            } else {
                "failed to build engine over the built-in knowledge base".to_string()
            }
        })?;
        let extractor = SynonymExtractor::from_kb(engine.kb());
        tracing::debug!(phrases = extractor.len(), "symptom extractor ready");

        Ok(Self {
            config,
            engine: Arc::new(engine),
            extractor,
        })
    }

    /// How many ranked diseases to print.
    #[must_use]
    pub fn ranked_limit(&self, flag: Option<u32>) -> usize {
        crate::commands::shared::limit::effective_limit(flag, self.config.general.ranked_limit)
    }
}
