//! Year-month period keys for the monthly CPI series
//!
//! Accepts `YYYY-MM` or `YYYY-MM-DD`. Full dates are normalized to the first
//! of their month, so `2024-03-17` and `2024-03` name the same period.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Error, Result};

/// A calendar month (year + month), ordered chronologically
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Build a period key, rejecting months outside 1..=12
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidInput(format!(
                "Invalid month {} (expected 1-12)",
                month
            )));
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Same month one year earlier (used for year-over-year CPI uplift)
    pub fn previous_year(&self) -> Self {
        Self {
            year: self.year - 1,
            month: self.month,
        }
    }

    /// Number of whole months from `self` to `other` (negative if `other` is earlier)
    pub fn months_until(&self, other: &PeriodKey) -> i64 {
        let from = self.year as i64 * 12 + (self.month as i64 - 1);
        let to = other.year as i64 * 12 + (other.month as i64 - 1);
        to - from
    }

    /// Storage form: first day of the month as an ISO date (`YYYY-MM-01`)
    pub fn to_db_date(&self) -> String {
        format!("{:04}-{:02}-01", self.year, self.month)
    }

    /// Parse a stored ISO date back into a period key
    pub fn from_db_date(value: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map_err(|e| Error::CorruptRow(format!("Invalid period date '{}': {}", value, e)))?;
        Ok(Self::from(date))
    }
}

impl From<NaiveDate> for PeriodKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for PeriodKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Ok(Self::from(date));
        }

        // chrono cannot parse a date without a day, so pad month-only input
        if let Ok(date) = NaiveDate::parse_from_str(&format!("{}-01", s), "%Y-%m-%d") {
            return Ok(Self::from(date));
        }

        Err(Error::InvalidInput(format!(
            "Invalid date format '{}'. Use YYYY-MM or YYYY-MM-DD.",
            s
        )))
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for PeriodKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PeriodKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Inclusive period range; either bound may be open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PeriodRange {
    pub from: Option<PeriodKey>,
    pub to: Option<PeriodKey>,
}

impl PeriodRange {
    pub fn new(from: Option<PeriodKey>, to: Option<PeriodKey>) -> Result<Self> {
        if let (Some(from), Some(to)) = (from, to) {
            if from > to {
                return Err(Error::InvalidInput(format!(
                    "Range start {} is after range end {}",
                    from, to
                )));
            }
        }
        Ok(Self { from, to })
    }

    /// Parse optional `from`/`to` query strings
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self> {
        let from = from.filter(|s| !s.is_empty()).map(str::parse).transpose()?;
        let to = to.filter(|s| !s.is_empty()).map(str::parse).transpose()?;
        Self::new(from, to)
    }
}
