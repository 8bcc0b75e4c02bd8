//! Date-range report aggregation
//!
//! Every log book feeds the same engine: filter records to an
//! inclusive date range, optionally narrow by a case-insensitive
//! substring search, group by day, ISO week or month, and sum each
//! numeric column independently. Groups with no records are omitted.

use crate::types::DateRange;
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// How report rows are grouped
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl GroupBy {
    /// Group key for a date
    ///
    /// Keys sort chronologically as plain strings: `2025-05-26`,
    /// `2025-W22`, `2025-05`. Weekly keys use the ISO week-numbering
    /// year, so late-December days can carry the next year's key.
    pub fn key_for(&self, date: NaiveDate) -> String {
        match self {
            GroupBy::Daily => date.format("%Y-%m-%d").to_string(),
            GroupBy::Weekly => {
                let week = date.iso_week();
                format!("{:04}-W{:02}", week.year(), week.week())
            }
            GroupBy::Monthly => date.format("%Y-%m").to_string(),
        }
    }
}

/// A record type that can be aggregated into report tables
pub trait Reportable {
    /// Numeric columns, in display order
    const FIELDS: &'static [&'static str];

    fn record_date(&self) -> NaiveDate;

    /// Value of a numeric column; unknown names read as zero
    fn field_value(&self, field: &str) -> Decimal;

    /// Text searched by the report filter
    fn search_text(&self) -> String {
        String::new()
    }
}

/// One aggregated row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SummaryRow {
    pub group: String,
    pub record_count: u64,
    pub totals: BTreeMap<String, Decimal>,
}

/// A full report: grouped rows plus independent column totals
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportTable {
    pub group_by: GroupBy,
    pub range: DateRange,
    pub rows: Vec<SummaryRow>,
    pub record_count: u64,
    pub totals: BTreeMap<String, Decimal>,
}

fn matches_search<R: Reportable>(record: &R, needle: &str) -> bool {
    record
        .search_text()
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Build a report over `records`
///
/// Rows come back in ascending group-key order.
pub fn build_report<R: Reportable>(
    records: &[R],
    range: DateRange,
    group_by: GroupBy,
    search: Option<&str>,
) -> ReportTable {
    let needle = search.map(str::trim).filter(|s| !s.is_empty());

    let mut groups: BTreeMap<String, SummaryRow> = BTreeMap::new();
    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut record_count = 0u64;

    for record in records {
        if !range.contains(record.record_date()) {
            continue;
        }
        if let Some(needle) = needle {
            if !matches_search(record, needle) {
                continue;
            }
        }

        let key = group_by.key_for(record.record_date());
        let row = groups.entry(key.clone()).or_insert_with(|| SummaryRow {
            group: key,
            record_count: 0,
            totals: BTreeMap::new(),
        });
        row.record_count += 1;
        record_count += 1;

        for field in R::FIELDS {
            let value = record.field_value(field);
            *row.totals.entry(field.to_string()).or_insert(Decimal::ZERO) += value;
            *totals.entry(field.to_string()).or_insert(Decimal::ZERO) += value;
        }
    }

    ReportTable {
        group_by,
        range,
        rows: groups.into_values().collect(),
        record_count,
        totals,
    }
}

/// Daily report from the first of the month through `as_of`
pub fn month_to_date<R: Reportable>(records: &[R], as_of: NaiveDate) -> ReportTable {
    build_report(records, DateRange::month_to_date(as_of), GroupBy::Daily, None)
}
