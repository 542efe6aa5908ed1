//! Expiration countdowns

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

const DAYS_PER_WEEK: i64 = 7;
const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

/// One day count seen in four units.
///
/// Every field is derived from `days`; they are alternate views of the same
/// delta and do not sum to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationBreakdown {
    pub days: i64,
    pub weeks: i64,
    pub months: i64,
    pub years: i64,
}

impl DurationBreakdown {
    pub fn from_days(days: i64) -> Self {
        Self {
            days,
            weeks: days.div_euclid(DAYS_PER_WEEK),
            months: days.div_euclid(DAYS_PER_MONTH),
            years: days.div_euclid(DAYS_PER_YEAR),
        }
    }
}

/// Time left until a registration expires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Countdown {
    Remaining {
        #[serde(flatten)]
        breakdown: DurationBreakdown,
        /// Whole minutes left
        minutes: i64,
    },
    /// The registry still lists the domain but its expiration has passed
    Expired,
}

impl Countdown {
    /// Countdown from `now` to `expiration`. A zero delta is not expired.
    pub fn between(expiration: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let delta = expiration.signed_duration_since(now);
        if delta < chrono::Duration::zero() {
            return Self::Expired;
        }

        Self::Remaining {
            breakdown: DurationBreakdown::from_days(delta.num_days()),
            minutes: delta.num_minutes(),
        }
    }

    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired)
    }

    pub fn breakdown(&self) -> Option<&DurationBreakdown> {
        match self {
            Self::Remaining { breakdown, .. } => Some(breakdown),
            Self::Expired => None,
        }
    }
}

impl fmt::Display for Countdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (breakdown, minutes) = match self {
            Self::Expired => return write!(f, "already expired"),
            Self::Remaining { breakdown, minutes } => (breakdown, *minutes),
        };

        let mut rest = breakdown.days;
        let years = rest / DAYS_PER_YEAR;
        rest %= DAYS_PER_YEAR;
        let months = rest / DAYS_PER_MONTH;
        rest %= DAYS_PER_MONTH;
        let weeks = rest / DAYS_PER_WEEK;
        let days = rest % DAYS_PER_WEEK;

        let parts: Vec<String> = [
            (years, "year"),
            (months, "month"),
            (weeks, "week"),
            (days, "day"),
        ]
        .iter()
        .filter(|(value, _)| *value > 0)
        .map(|(value, unit)| pluralize(*value, unit))
        .collect();

        if parts.is_empty() {
            write!(f, "less than a day")?;
        } else {
            write!(f, "{}", parts.join(", "))?;
        }

        write!(f, " ({})", pluralize(minutes, "minute"))
    }
}

fn pluralize(value: i64, unit: &str) -> String {
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}
