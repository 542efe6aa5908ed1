//! Availability verdicts

use crate::domain::{Countdown, DomainValidator, RegistryLookup, RegistryRecord};
use crate::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Normalized availability and expiration judgment for one domain.
///
/// Only [`AvailabilityVerdict::available`] and
/// [`AvailabilityVerdict::registered`] build one, so an available domain
/// never carries an expiration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AvailabilityVerdict {
    pub domain: String,
    pub available: bool,
    pub expiration: Option<DateTime<Utc>>,
    pub expires_in: Option<Countdown>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
}

impl AvailabilityVerdict {
    pub fn available(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            available: true,
            expiration: None,
            expires_in: None,
            registrar: None,
        }
    }

    pub fn registered(
        domain: impl Into<String>,
        expiration: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
        registrar: Option<String>,
    ) -> Self {
        Self {
            domain: domain.into(),
            available: false,
            expiration,
            expires_in: expiration.map(|exp| Countdown::between(exp, now)),
            registrar,
        }
    }
}

/// Turns registry lookups into [`AvailabilityVerdict`]s
pub struct AvailabilityEvaluator {
    lookup: Arc<dyn RegistryLookup>,
    validator: DomainValidator,
}

impl AvailabilityEvaluator {
    pub fn new(lookup: Arc<dyn RegistryLookup>) -> Self {
        Self {
            lookup,
            validator: DomainValidator::new(),
        }
    }

    /// Evaluate a domain against the current time
    pub async fn evaluate(&self, domain: &str) -> Result<AvailabilityVerdict> {
        self.evaluate_at(domain, Utc::now()).await
    }

    /// Evaluate a domain with an explicit "now"
    pub async fn evaluate_at(&self, domain: &str, now: DateTime<Utc>) -> Result<AvailabilityVerdict> {
        let validated = self.validator.validate(domain)?;
        let record = self.lookup_once(&validated.full_domain).await?;
        Ok(Self::interpret(&validated.full_domain, &record, now))
    }

    /// Availability only; expiration is not looked at
    pub async fn is_available(&self, domain: &str) -> Result<bool> {
        let validated = self.validator.validate(domain)?;
        let record = self.lookup_once(&validated.full_domain).await?;
        Ok(!record.is_registered())
    }

    /// Build a verdict from a registry record
    pub fn interpret(domain: &str, record: &RegistryRecord, now: DateTime<Utc>) -> AvailabilityVerdict {
        if !record.is_registered() {
            return AvailabilityVerdict::available(domain);
        }

        AvailabilityVerdict::registered(
            domain,
            record.expiration_date.resolve(),
            now,
            record.registrar.clone(),
        )
    }

    async fn lookup_once(&self, domain: &str) -> Result<RegistryRecord> {
        let start_time = Instant::now();

        match self.lookup.lookup(domain).await {
            Ok(record) => {
                tracing::debug!(
                    domain = %domain,
                    lookup = self.lookup.name(),
                    method = %record.method,
                    registered = record.is_registered(),
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Domain evaluated"
                );
                Ok(record)
            }
            Err(e) => {
                tracing::warn!(
                    domain = %domain,
                    lookup = self.lookup.name(),
                    error = %e,
                    duration_ms = %start_time.elapsed().as_millis(),
                    "Registry lookup failed"
                );
                Err(e)
            }
        }
    }
}
