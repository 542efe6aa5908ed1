//! Process configuration from environment variables

use crate::error::{DomainScoutError, Result};
use crate::types::{CheckConfig, LlmConfig, SuggestConfig};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Everything the server binary needs to start
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub check: CheckConfig,
    pub suggest: SuggestConfig,
    /// Providers in preference order; the first one is the default
    pub llm: Vec<LlmConfig>,
}

impl AppConfig {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Read configuration through an arbitrary variable source
    pub fn from_vars<F>(var: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse_var(&var, "PORT", 10000)?;

        let check = CheckConfig {
            timeout: Duration::from_secs(parse_var(&var, "LOOKUP_TIMEOUT_SECS", 10)?),
            ..Default::default()
        };

        let defaults = SuggestConfig::default();
        let suggest = SuggestConfig {
            count: parse_var(&var, "SUGGESTION_COUNT", defaults.count)?,
            candidate_batch: parse_var(&var, "CANDIDATE_BATCH", defaults.candidate_batch)?,
            max_fallback_attempts: parse_var(
                &var,
                "MAX_FALLBACK_ATTEMPTS",
                defaults.max_fallback_attempts,
            )?,
            ..defaults
        };

        if suggest.count == 0 {
            return Err(DomainScoutError::config("SUGGESTION_COUNT must be at least 1"));
        }

        let mut llm = Vec::new();

        if let Some(api_key) = var("OPENAI_API_KEY").filter(|k| !k.is_empty()) {
            llm.push(LlmConfig {
                provider: "openai".to_string(),
                model: var("OPENAI_MODEL").unwrap_or_else(|| "gpt-4.1-mini".to_string()),
                api_key,
                base_url: var("OPENAI_BASE_URL"),
                temperature: 0.7,
            });
        }

        if let Some(api_key) = var("ANTHROPIC_API_KEY").filter(|k| !k.is_empty()) {
            llm.push(LlmConfig {
                provider: "anthropic".to_string(),
                model: var("ANTHROPIC_MODEL").unwrap_or_else(|| "claude-sonnet-4-0".to_string()),
                api_key,
                base_url: None,
                temperature: 0.7,
            });
        }

        Ok(Self {
            host,
            port,
            check,
            suggest,
            llm,
        })
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(var: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| DomainScoutError::config(format!("Invalid value for {}: '{}'", key, raw))),
    }
}
