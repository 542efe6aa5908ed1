//! Domain availability evaluation
//!
//! A [`RegistryLookup`] fetches raw registration data; the
//! [`AvailabilityEvaluator`] turns it into an [`AvailabilityVerdict`].

pub mod countdown;
pub mod evaluator;
pub mod expiration;
pub mod lookup;
pub mod validator;

pub use countdown::{Countdown, DurationBreakdown};
pub use evaluator::{AvailabilityEvaluator, AvailabilityVerdict};
pub use expiration::ExpirationField;
pub use lookup::RegistryClient;
pub use validator::{DomainValidator, ValidatedDomain};

use crate::error::Result;
use crate::types::LookupMethod;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// What a registry reported for one queried name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryRecord {
    /// Registration marker; `None` means the registry has no such domain
    #[serde(default)]
    pub domain_name: Option<String>,
    #[serde(default)]
    pub expiration_date: ExpirationField,
    #[serde(default)]
    pub registrar: Option<String>,
    pub method: LookupMethod,
}

impl RegistryRecord {
    /// Record for a name the registry does not know
    pub fn unregistered(method: LookupMethod) -> Self {
        Self {
            domain_name: None,
            expiration_date: ExpirationField::Absent,
            registrar: None,
            method,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.domain_name.is_some()
    }
}

/// Source of registration data for a single domain
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    /// Look up a normalized, validated domain.
    ///
    /// An `Err` means the lookup could not be completed; it never stands in
    /// for "not registered".
    async fn lookup(&self, domain: &str) -> Result<RegistryRecord>;

    /// Get the lookup name
    fn name(&self) -> &'static str;
}
