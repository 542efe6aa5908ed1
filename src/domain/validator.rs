//! Input checking for domain names

use crate::error::{DomainScoutError, Result};
use crate::validation_error;
use regex::Regex;

const MAX_DOMAIN_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// Checks and normalizes caller-supplied or generated domain names
#[derive(Debug, Clone, Default)]
pub struct DomainValidator;

impl DomainValidator {
    pub fn new() -> Self {
        Self
    }

    /// Trim, lowercase and check `domain`.
    ///
    /// Accepts `label(.label)*.tld` where labels are `[a-z0-9-]`, do not
    /// start or end with a hyphen and are at most 63 characters, and the
    /// TLD is alphabetic.
    pub fn validate(&self, domain: &str) -> Result<ValidatedDomain> {
        let full_domain = domain.trim().to_lowercase();

        if full_domain.is_empty() {
            return Err(validation_error!("Domain name cannot be empty"));
        }
        if full_domain.len() > MAX_DOMAIN_LEN {
            return Err(validation_error!(
                "Domain name too long (max {} characters)",
                MAX_DOMAIN_LEN
            ));
        }

        let (name, tld) = full_domain
            .rsplit_once('.')
            .ok_or_else(|| validation_error!("Domain must include a TLD"))?;

        let tld_pattern =
            Regex::new(r"^[a-z]{2,63}$").map_err(|e| DomainScoutError::internal(e.to_string()))?;
        if !tld_pattern.is_match(tld) {
            return Err(validation_error!("Invalid TLD '{}'", tld));
        }

        let label_pattern =
            Regex::new(r"^[a-z0-9-]+$").map_err(|e| DomainScoutError::internal(e.to_string()))?;
        for label in name.split('.') {
            check_label(&label_pattern, label)?;
        }

        Ok(ValidatedDomain {
            name: name.to_string(),
            tld: tld.to_string(),
            full_domain,
        })
    }
}

fn check_label(pattern: &Regex, label: &str) -> Result<()> {
    if label.is_empty() {
        return Err(validation_error!("Domain contains an empty label"));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(validation_error!(
            "Domain label too long (max {} characters)",
            MAX_LABEL_LEN
        ));
    }
    if !pattern.is_match(label) {
        return Err(validation_error!("Domain contains invalid characters"));
    }
    if label.starts_with('-') || label.ends_with('-') {
        return Err(validation_error!("Domain label cannot start or end with hyphen"));
    }
    Ok(())
}

/// A domain that passed validation, lowercased and trimmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedDomain {
    /// Everything left of the TLD, e.g. `sub.example`
    pub name: String,
    pub tld: String,
    pub full_domain: String,
}

impl ValidatedDomain {
    /// The label directly left of the TLD (`example` for `sub.example.com`)
    pub fn registrable_label(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}
