//! Calendar-day newtypes: the LMP date and the reference "today".
//!
//! Both wrap `chrono::NaiveDate`, so no time-of-day or timezone ever reaches
//! the dating arithmetic. Text parsing accepts the ISO calendar form
//! (`YYYY-MM-DD`) only.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// ISO calendar date format used for parsing and canonical display.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Error returned when a date string cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DateParseError {
    /// The input was empty (or whitespace only).
    #[error("empty date (expected YYYY-MM-DD)")]
    Empty,

    /// The input was not a valid ISO calendar date.
    #[error("invalid date '{input}' (expected YYYY-MM-DD): {source}")]
    Invalid {
        /// The rejected input, trimmed.
        input: String,
        /// The underlying chrono parse failure.
        #[source]
        source: chrono::ParseError,
    },
}

fn parse_iso_date(s: &str) -> Result<NaiveDate, DateParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }
    NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).map_err(|source| DateParseError::Invalid {
        input: trimmed.to_string(),
        source,
    })
}

/// First day of the last menstrual period.
///
/// Serializes as an ISO date string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LmpDate(NaiveDate);

impl LmpDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for LmpDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl FromStr for LmpDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso_date(s).map(Self)
    }
}

impl fmt::Display for LmpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}

/// The reference "today", truncated to a UTC calendar day.
///
/// Injected once at startup and passed explicitly to every computation that
/// needs it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceDate(NaiveDate);

impl ReferenceDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Truncate an instant to its UTC calendar day.
    pub fn from_utc(instant: DateTime<Utc>) -> Self {
        Self(instant.date_naive())
    }

    /// The current UTC calendar day.
    pub fn today() -> Self {
        Self::from_utc(Utc::now())
    }

    pub fn date(self) -> NaiveDate {
        self.0
    }
}

impl FromStr for ReferenceDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_iso_date(s).map(Self)
    }
}

impl fmt::Display for ReferenceDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(ISO_DATE_FORMAT))
    }
}
