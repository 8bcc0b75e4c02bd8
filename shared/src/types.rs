//! Common types used across the platform

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Date range for queries, inclusive on both ends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Range covering the first day of the month of `as_of` through `as_of`
    pub fn month_to_date(as_of: NaiveDate) -> Self {
        let first = NaiveDate::from_ymd_opt(as_of.year(), as_of.month(), 1).unwrap_or(as_of);
        Self {
            start: first,
            end: as_of,
        }
    }

    /// Whether `date` falls inside the range, start and end included
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}
