//! LLM provider implementations

pub mod anthropic;
pub mod openai;

pub use anthropic::AnthropicProvider;
pub use openai::OpenAiProvider;

use crate::error::DomainScoutError;

/// System message shared by every provider
pub const SYSTEM_PROMPT: &str =
    "You suggest domain names. Reply with domain names only, one per line, with no numbering and no commentary.";

/// Build the prompt asking for alternatives to `seed`
pub fn build_suggestion_prompt(seed: &str, count: usize) -> String {
    format!(
        "Suggest {count} alternative domain names for someone who wanted \"{seed}\".

Rules:
- brandable and short
- no digits, no misspellings, no hyphens or other special characters
- safe for work
- include the TLD (for example .com or .io)
- one domain name per line
- no explanations, headings, numbering or extra text"
    )
}

/// Map a non-success HTTP status to a provider error
pub(crate) fn status_error(provider: &str, status: reqwest::StatusCode, body: &str) -> DomainScoutError {
    let message = match status.as_u16() {
        401 => "Authentication failed (401). Please check the API key".to_string(),
        403 => "Access forbidden (403). The API key may not have permission for this endpoint".to_string(),
        429 => "Rate limit or quota exceeded (429)".to_string(),
        500..=599 => format!("Server error ({}). The API service is experiencing issues", status),
        _ => format!("API request failed ({}): {}", status, body),
    };

    DomainScoutError::llm_provider(provider, message, Some(status.as_u16().to_string()))
}
