/// How often a habit has to be repeated
///
/// A frequency is a closed set of two periods. On disk it is written as a
/// duration in nanoseconds so older snapshot files and databases stay readable.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

const NANOS_PER_DAY: i64 = 24 * 60 * 60 * 1_000_000_000;

/// The period after which a habit falls due again
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Frequency {
    /// Every 24 hours
    Daily,
    /// Every 7 × 24 hours
    Weekly,
}

impl Frequency {
    /// Length of one period
    pub fn duration(self) -> Duration {
        match self {
            Frequency::Daily => Duration::days(1),
            Frequency::Weekly => Duration::weeks(1),
        }
    }

    /// Length of one period in nanoseconds, the persisted representation
    pub fn as_nanos(self) -> i64 {
        match self {
            Frequency::Daily => NANOS_PER_DAY,
            Frequency::Weekly => 7 * NANOS_PER_DAY,
        }
    }

    /// Rebuild a frequency from its persisted duration
    pub fn from_nanos(nanos: i64) -> Result<Self, DomainError> {
        match nanos {
            n if n == NANOS_PER_DAY => Ok(Frequency::Daily),
            n if n == 7 * NANOS_PER_DAY => Ok(Frequency::Weekly),
            other => Err(DomainError::InvalidFrequency(format!(
                "unsupported duration {}ns",
                other
            ))),
        }
    }

    /// Plural unit used when counting periods ("days", "weeks")
    pub fn unit(self) -> &'static str {
        match self {
            Frequency::Daily => "days",
            Frequency::Weekly => "weeks",
        }
    }

    /// Singular unit used in "N-day streak" style phrases
    pub fn unit_singular(self) -> &'static str {
        match self {
            Frequency::Daily => "day",
            Frequency::Weekly => "week",
        }
    }

    /// When the habit is due next, as a phrase
    pub fn next_phrase(self) -> &'static str {
        match self {
            Frequency::Daily => "tomorrow",
            Frequency::Weekly => "in a week",
        }
    }

    /// Token accepted from callers
    pub fn as_str(self) -> &'static str {
        match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
        }
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    /// Parse a caller-supplied token. Matching is case-sensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "" => Err(DomainError::InvalidFrequency(
                "habit frequency cannot be empty".to_string(),
            )),
            other => Err(DomainError::InvalidFrequency(format!(
                "unknown frequency: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i64> for Frequency {
    type Error = DomainError;

    fn try_from(nanos: i64) -> Result<Self, Self::Error> {
        Self::from_nanos(nanos)
    }
}

impl From<Frequency> for i64 {
    fn from(frequency: Frequency) -> Self {
        frequency.as_nanos()
    }
}
