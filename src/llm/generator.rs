//! Alternative-name generation over one or more LLM providers

use crate::error::{DomainScoutError, Result};
use crate::llm::providers::{build_suggestion_prompt, SYSTEM_PROMPT};
use crate::llm::{create_provider, CandidateSource, LlmProvider};
use crate::types::LlmConfig;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Instant;

/// Asks the default provider for names, then the others in registration order
#[derive(Clone, Default)]
pub struct NameGenerator {
    providers: Arc<RwLock<Vec<Arc<dyn LlmProvider>>>>,
    default_provider: Arc<RwLock<Option<String>>>,
}

impl NameGenerator {
    /// Create a generator with no providers
    pub fn new() -> Self {
        Self::default()
    }

    /// Build and register a provider from configuration
    pub fn add_provider(&self, config: &LlmConfig) -> Result<()> {
        let provider = create_provider(config)?;
        self.register(Arc::from(provider));
        Ok(())
    }

    /// Register an already-built provider, replacing one with the same name
    pub fn register(&self, provider: Arc<dyn LlmProvider>) {
        let mut providers = self.providers.write();
        providers.retain(|p| p.name() != provider.name());
        providers.push(provider);
    }

    /// Set default provider; ignored unless that provider is registered
    pub fn set_default_provider(&self, provider: &str) {
        if self.has_provider(provider) {
            *self.default_provider.write() = Some(provider.to_string());
        }
    }

    pub fn has_provider(&self, provider: &str) -> bool {
        self.providers.read().iter().any(|p| p.name() == provider)
    }

    /// Providers in the order they should be tried
    fn ordered_providers(&self) -> Vec<Arc<dyn LlmProvider>> {
        let default = self.default_provider.read().clone();
        let mut providers = self.providers.read().clone();
        if let Some(default) = default {
            // stable sort keeps registration order for the rest
            providers.sort_by_key(|p| p.name() != default);
        }
        providers
    }

    /// Run the prompt against each provider until one answers
    pub async fn complete_with_fallback(&self, prompt: &str) -> Result<String> {
        let overall_start = Instant::now();
        let mut last_error = None;

        // Clone the list so no lock is held across an await
        for (attempt, provider) in self.ordered_providers().into_iter().enumerate() {
            let start_time = Instant::now();
            match provider.complete(SYSTEM_PROMPT, prompt).await {
                Ok(text) => {
                    tracing::info!(
                        provider = provider.name(),
                        model = provider.model(),
                        fallback_used = attempt > 0,
                        duration_ms = %start_time.elapsed().as_millis(),
                        "Name generation completed"
                    );
                    return Ok(text);
                }
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        duration_ms = %start_time.elapsed().as_millis(),
                        "Name generation failed"
                    );
                    last_error = Some(e);
                }
            }
        }

        tracing::warn!(
            duration_ms = %overall_start.elapsed().as_millis(),
            "All providers failed"
        );
        Err(last_error.unwrap_or_else(|| DomainScoutError::config("No LLM providers configured")))
    }
}

#[async_trait]
impl CandidateSource for NameGenerator {
    async fn generate(&self, seed: &str, count: usize) -> Result<String> {
        let prompt = build_suggestion_prompt(seed, count);
        self.complete_with_fallback(&prompt).await
    }
}
