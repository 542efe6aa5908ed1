//! Error handling for domain-scout

use std::time::Duration;
use thiserror::Error;

/// Main error type for domain-scout
#[derive(Error, Debug, Clone)]
pub enum DomainScoutError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("LLM provider error ({provider}): {message}")]
    LlmProvider {
        provider: String,
        message: String,
        code: Option<String>,
    },

    #[error("Registry lookup error for '{domain}': {message}")]
    DomainCheck {
        domain: String,
        message: String,
        method: Option<String>,
    },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Timeout error: {operation} timed out after {timeout_secs}s")]
    Timeout {
        operation: String,
        timeout_secs: u64,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Only {found} of {wanted} suggestions for '{domain}' could be confirmed available")]
    SuggestionsExhausted {
        domain: String,
        found: usize,
        wanted: usize,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Coarse error classes as seen by callers of the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or malformed caller input
    Input,
    /// Registry or AI collaborator failed, timed out, or under-delivered
    CollaboratorUnavailable,
    /// Collaborator answered with data in an unexpected shape
    NormalizationAmbiguity,
    /// Misconfiguration or a bug
    Internal,
}

impl DomainScoutError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an LLM provider error
    pub fn llm_provider(
        provider: impl Into<String>,
        message: impl Into<String>,
        code: Option<String>,
    ) -> Self {
        Self::LlmProvider {
            provider: provider.into(),
            message: message.into(),
            code,
        }
    }

    /// Create a registry lookup error
    pub fn domain_check(
        domain: impl Into<String>,
        message: impl Into<String>,
        method: Option<String>,
    ) -> Self {
        Self::DomainCheck {
            domain: domain.into(),
            message: message.into(),
            method,
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, timeout_secs: u64) -> Self {
        Self::Timeout {
            operation: operation.into(),
            timeout_secs,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an error for a suggestion run that fell short of its target
    pub fn suggestions_exhausted(domain: impl Into<String>, found: usize, wanted: usize) -> Self {
        Self::SuggestionsExhausted {
            domain: domain.into(),
            found,
            wanted,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Input,
            Self::LlmProvider { .. }
            | Self::DomainCheck { .. }
            | Self::Network { .. }
            | Self::Timeout { .. }
            | Self::SuggestionsExhausted { .. } => ErrorKind::CollaboratorUnavailable,
            Self::Parse { .. } => ErrorKind::NormalizationAmbiguity,
            Self::Config { .. } | Self::Internal { .. } => ErrorKind::Internal,
        }
    }

    /// Message that is safe to hand back to an API caller.
    ///
    /// Validation messages describe the caller's own input and are returned
    /// as-is; everything else is reduced to a fixed sentence.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation { message } => message.clone(),
            Self::SuggestionsExhausted { wanted, .. } => {
                format!("Could not find {} available suggestions", wanted)
            }
            _ => match self.kind() {
                ErrorKind::CollaboratorUnavailable => {
                    "Upstream lookup could not be completed".to_string()
                }
                ErrorKind::NormalizationAmbiguity => {
                    "Upstream returned data that could not be interpreted".to_string()
                }
                _ => "Internal server error".to_string(),
            },
        }
    }
}

impl DomainScoutError {
    /// Classify a transport failure; `timeout` is the limit the client ran with
    pub fn http(err: reqwest::Error, operation: impl Into<String>, timeout: Duration) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_timeout() {
            Self::timeout(operation, timeout.as_secs())
        } else if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else if err.is_request() {
            Self::network("Request failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DomainScoutError>;

/// Build a validation error from a message or format string
#[macro_export]
macro_rules! validation_error {
    ($msg:expr) => {
        $crate::error::DomainScoutError::validation($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::DomainScoutError::validation(format!($fmt, $($arg)*))
    };
}
