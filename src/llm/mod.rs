//! LLM (Large Language Model) integration module
//!
//! Providers turn a prompt into raw text; the [`NameGenerator`] asks them for
//! alternative domain names.

pub mod generator;
pub mod providers;

pub use generator::NameGenerator;

use crate::error::{DomainScoutError, Result};
use crate::types::LlmConfig;
use async_trait::async_trait;

/// Core trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send a single-turn prompt and return the text of the reply
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;

    /// Get provider name
    fn name(&self) -> &'static str;

    /// Get model name being used
    fn model(&self) -> &str;
}

/// Anything that can propose alternative names for a seed domain.
///
/// The returned text is untrusted: callers split it into lines and verify
/// every name themselves.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn generate(&self, seed: &str, count: usize) -> Result<String>;
}

/// Get available LLM providers
pub fn available_providers() -> Vec<&'static str> {
    vec!["openai", "anthropic"]
}

/// Create an LLM provider from configuration
pub fn create_provider(config: &LlmConfig) -> Result<Box<dyn LlmProvider>> {
    match config.provider.as_str() {
        "openai" => Ok(Box::new(providers::OpenAiProvider::new(config)?)),
        "anthropic" => Ok(Box::new(providers::AnthropicProvider::new(config)?)),
        _ => Err(DomainScoutError::config(format!(
            "Unsupported LLM provider: {}. Supported providers: {}",
            config.provider,
            available_providers().join(", ")
        ))),
    }
}
