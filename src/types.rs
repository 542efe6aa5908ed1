//! Core types and structures for domain-scout

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Registry lookup method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupMethod {
    Rdap,
    Whois,
}

impl std::fmt::Display for LookupMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LookupMethod::Rdap => write!(f, "rdap"),
            LookupMethod::Whois => write!(f, "whois"),
        }
    }
}

/// Where an accepted suggestion came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionOrigin {
    Ai,
    Fallback,
}

impl std::fmt::Display for SuggestionOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SuggestionOrigin::Ai => write!(f, "ai"),
            SuggestionOrigin::Fallback => write!(f, "fallback"),
        }
    }
}

/// Configuration for registry lookups
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckConfig {
    pub timeout: Duration,
    pub enable_rdap: bool,
    pub enable_whois: bool,
    /// Send every RDAP query to this base URL instead of the per-TLD server
    pub rdap_base_override: Option<String>,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            enable_rdap: true,
            enable_whois: true,
            rdap_base_override: None,
        }
    }
}

/// Fallback suffixes, tried in order and cycled
pub const DEFAULT_SUFFIXES: &[&str] = &["now", "hub", "site", "online", "pro"];

/// Configuration for the suggestion resolver
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestConfig {
    /// Number of confirmed-available names to return
    pub count: usize,
    /// Number of names to ask the AI source for
    pub candidate_batch: usize,
    /// Upper bound on synthesized fallback candidates per request
    pub max_fallback_attempts: usize,
    pub suffixes: Vec<String>,
    /// TLD appended to synthesized candidates
    pub fallback_tld: String,
}

impl Default for SuggestConfig {
    fn default() -> Self {
        Self {
            count: 5,
            candidate_batch: 10,
            max_fallback_attempts: 25,
            suffixes: DEFAULT_SUFFIXES.iter().map(|s| s.to_string()).collect(),
            fallback_tld: "com".to_string(),
        }
    }
}

/// LLM configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub provider: String,
    pub model: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub temperature: f32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: "gpt-4.1-mini".to_string(),
            api_key: String::new(),
            base_url: None,
            temperature: 0.7,
        }
    }
}
