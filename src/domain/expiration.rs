//! Registry expiration values and timestamp normalization
//!
//! Registries report expiration as nothing, a single timestamp, or several
//! timestamps. [`ExpirationField`] captures those shapes once; everything
//! downstream only ever sees an `Option<DateTime<Utc>>`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Expiration value as reported by a registry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpirationField {
    /// Several expiry events; the first one is authoritative
    Multiple(Vec<String>),
    Single(String),
    #[default]
    Absent,
}

impl ExpirationField {
    /// Build from however many raw values a registry produced
    pub fn from_values(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => Self::Absent,
            1 => Self::Single(values.remove(0)),
            _ => Self::Multiple(values),
        }
    }

    /// The raw value that decides the expiration
    pub fn authoritative(&self) -> Option<&str> {
        match self {
            Self::Absent => None,
            Self::Single(raw) => Some(raw.as_str()),
            Self::Multiple(raws) => raws.first().map(String::as_str),
        }
    }

    /// Resolve to a UTC timestamp; anything unparseable is unknown
    pub fn resolve(&self) -> Option<DateTime<Utc>> {
        let raw = self.authoritative()?;
        let parsed = parse_timestamp(raw);
        if parsed.is_none() {
            tracing::debug!(raw = %raw, "Unrecognized expiration timestamp");
        }
        parsed
    }
}

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M:%S UTC",
    "%d-%b-%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%b-%Y", "%d.%m.%Y", "%Y.%m.%d", "%Y/%m/%d"];

/// Parse a registry timestamp into UTC.
///
/// Offset-carrying values are converted; naive values are taken as UTC and
/// date-only values as midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%d %H:%M:%S%z", "%Y-%m-%dT%H:%M:%S%z"] {
        if let Ok(dt) = DateTime::parse_from_str(raw, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
        }
    }

    None
}
