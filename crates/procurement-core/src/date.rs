//! The run date shared by every pipeline stage.

use crate::error::CoreError;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calendar date of a pipeline run.
///
/// Serializes as `YYYY-MM-DD`, which is also the form used in partition
/// directory names (`orders_date=2024-01-15`) and log file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PipelineDate(NaiveDate);

impl PipelineDate {
    /// Wrap a calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Today's date in the local timezone.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Build a date from its components, if they form a valid calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The wrapped calendar date.
    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Seed value derived from the date, as the integer `YYYYMMDD`.
    ///
    /// Generators that must be reproducible for a given date seed their RNG
    /// from this value.
    pub fn seed(&self) -> u64 {
        let year = self.0.year().max(0) as u64;
        year * 10_000 + u64::from(self.0.month()) * 100 + u64::from(self.0.day())
    }
}

impl fmt::Display for PipelineDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for PipelineDate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self)
            .map_err(|e| CoreError::InvalidDate {
                value: s.to_string(),
                reason: e.to_string(),
            })
    }
}

impl From<NaiveDate> for PipelineDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}
