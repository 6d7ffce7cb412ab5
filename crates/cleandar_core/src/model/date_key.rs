//! Calendar date key.
//!
//! # Invariants
//! - Text form is exactly `YYYY-MM-DD`; non-canonical spellings such as
//!   `2024-3-1` are rejected so each date has one key.
//! - Ordering is chronological.

use super::ModelError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// Unique key of a day record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Returns `None` when the triple is not a real calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// Parses the canonical `YYYY-MM-DD` form.
    pub fn parse(value: &str) -> Result<Self, ModelError> {
        let date = NaiveDate::parse_from_str(value, DATE_KEY_FORMAT)
            .map_err(|_| ModelError::InvalidDateKey(value.to_string()))?;
        let key = Self(date);
        if key.to_string() != value {
            return Err(ModelError::InvalidDateKey(value.to_string()));
        }
        Ok(key)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(DATE_KEY_FORMAT))
    }
}

impl FromStr for DateKey {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl From<NaiveDate> for DateKey {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

impl TryFrom<String> for DateKey {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}
