//! Domain Scout - domain availability verdicts and alternative-name suggestions
//!
//! Looks a domain up in its registry, reports whether it can be registered
//! and how long until the current registration expires, and proposes
//! available alternatives using an LLM with a deterministic fallback.

pub mod config;
pub mod domain;
pub mod error;
pub mod llm;
pub mod server;
pub mod suggest;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{DomainScoutError, ErrorKind, Result};
pub use types::{CheckConfig, LlmConfig, LookupMethod, SuggestConfig, SuggestionOrigin};

// Re-export main functionality
pub use domain::{AvailabilityEvaluator, AvailabilityVerdict, Countdown, RegistryClient, RegistryLookup};
pub use llm::{CandidateSource, NameGenerator};
pub use suggest::{SuggestionResolver, SuggestionSet};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
pub fn init() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();
    Ok(())
}
