//! Report aggregation tests for the Refinery Operations Platform
//!
//! Covers the shared report engine over stock and chemical records:
//! inclusive date ranges, daily/weekly/monthly grouping, independent
//! column totals and the case-insensitive search filter.

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{ChemicalRecord, StockRecord};
use shared::reports::{build_report, month_to_date, GroupBy, Reportable};
use shared::types::DateRange;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stock(d: NaiveDate, cpo: &str, olein: &str) -> StockRecord {
    StockRecord {
        log_date: d,
        cpo_mt: dec(cpo),
        rbd_palm_oil_mt: Decimal::ZERO,
        olein_mt: dec(olein),
        stearin_mt: Decimal::ZERO,
        pfad_mt: Decimal::ZERO,
    }
}

fn chemical(d: NaiveDate, name: &str, qty: &str) -> ChemicalRecord {
    ChemicalRecord {
        log_date: d,
        chemical: name.to_string(),
        quantity_kg: dec(qty),
        feed_mt: dec("100"),
        dosage_percent: Decimal::ZERO,
    }
}

// ============================================================================
// Property: Date-Range Aggregation
// ============================================================================
// Over any set of daily records, the report total for a column SHALL
// equal the sum of that column over the records inside the inclusive
// range, regardless of grouping.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Totals are invariant under the grouping choice
    #[test]
    fn property_totals_ignore_grouping(quantities in prop::collection::vec(0u32..1000, 1..20)) {
        let records: Vec<StockRecord> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let day = date(2025, 5, 1) + chrono::Days::new(i as u64);
                stock(day, &q.to_string(), "0")
            })
            .collect();
        let range = DateRange::new(date(2025, 5, 1), date(2025, 6, 30));

        let daily = build_report(&records, range, GroupBy::Daily, None);
        let weekly = build_report(&records, range, GroupBy::Weekly, None);
        let monthly = build_report(&records, range, GroupBy::Monthly, None);

        let expected: Decimal = quantities.iter().map(|q| Decimal::from(*q)).sum();
        prop_assert_eq!(daily.totals["cpo_mt"], expected);
        prop_assert_eq!(weekly.totals["cpo_mt"], expected);
        prop_assert_eq!(monthly.totals["cpo_mt"], expected);
    }

    /// Row totals sum back to the report total
    #[test]
    fn property_rows_sum_to_total(quantities in prop::collection::vec(0u32..1000, 1..20)) {
        let records: Vec<StockRecord> = quantities
            .iter()
            .enumerate()
            .map(|(i, q)| {
                let day = date(2025, 5, 1) + chrono::Days::new(i as u64);
                stock(day, &q.to_string(), "0")
            })
            .collect();
        let report = build_report(
            &records,
            DateRange::new(date(2025, 5, 1), date(2025, 6, 30)),
            GroupBy::Weekly,
            None,
        );

        let row_sum: Decimal = report.rows.iter().map(|r| r.totals["cpo_mt"]).sum();
        prop_assert_eq!(row_sum, report.totals["cpo_mt"]);

        let row_count: u64 = report.rows.iter().map(|r| r.record_count).sum();
        prop_assert_eq!(row_count, report.record_count);
    }
}

// ============================================================================
// Unit Tests for Stock Reports
// ============================================================================

#[test]
fn test_inclusive_range_totals() {
    // Stocks on the 25th and 26th: a range covering both sums to 220
    let records = vec![
        stock(date(2025, 5, 25), "100", "30"),
        stock(date(2025, 5, 26), "120", "45"),
    ];
    let report = build_report(
        &records,
        DateRange::new(date(2025, 5, 25), date(2025, 5, 26)),
        GroupBy::Daily,
        None,
    );
    assert_eq!(report.totals["cpo_mt"], dec("220"));
    assert_eq!(report.totals["olein_mt"], dec("75"));
    assert_eq!(report.record_count, 2);
}

#[test]
fn test_narrowed_range_drops_excluded_days() {
    let records = vec![
        stock(date(2025, 5, 25), "100", "30"),
        stock(date(2025, 5, 26), "120", "45"),
    ];
    let report = build_report(
        &records,
        DateRange::new(date(2025, 5, 25), date(2025, 5, 25)),
        GroupBy::Daily,
        None,
    );
    assert_eq!(report.totals["cpo_mt"], dec("100"));
    assert_eq!(report.rows.len(), 1);
}

#[test]
fn test_zero_record_groups_are_omitted() {
    let records = vec![
        stock(date(2025, 5, 25), "100", "0"),
        stock(date(2025, 6, 2), "40", "0"),
    ];
    let report = build_report(
        &records,
        DateRange::new(date(2025, 5, 1), date(2025, 6, 30)),
        GroupBy::Monthly,
        None,
    );
    let keys: Vec<&str> = report.rows.iter().map(|r| r.group.as_str()).collect();
    assert_eq!(keys, vec!["2025-05", "2025-06"]);
}

#[test]
fn test_weekly_keys_use_iso_week_year() {
    // 2024-12-30 belongs to ISO week 1 of 2025
    assert_eq!(GroupBy::Weekly.key_for(date(2024, 12, 30)), "2025-W01");
    assert_eq!(GroupBy::Weekly.key_for(date(2025, 5, 26)), "2025-W22");

    let records = vec![stock(date(2024, 12, 30), "10", "0")];
    let report = build_report(
        &records,
        DateRange::new(date(2024, 12, 1), date(2025, 1, 31)),
        GroupBy::Weekly,
        None,
    );
    assert_eq!(report.rows[0].group, "2025-W01");
}

#[test]
fn test_month_to_date_window() {
    let records = vec![
        stock(date(2025, 4, 30), "999", "0"),
        stock(date(2025, 5, 1), "10", "0"),
        stock(date(2025, 5, 26), "20", "0"),
        stock(date(2025, 5, 27), "999", "0"),
    ];
    let report = month_to_date(&records, date(2025, 5, 26));
    assert_eq!(report.totals["cpo_mt"], dec("30"));
    assert_eq!(report.group_by, GroupBy::Daily);
}

// ============================================================================
// Unit Tests for the Search Filter
// ============================================================================

#[test]
fn test_search_is_case_insensitive_substring() {
    let records = vec![
        chemical(date(2025, 5, 25), "Phosphoric Acid", "50"),
        chemical(date(2025, 5, 25), "Bleaching Earth", "80"),
        chemical(date(2025, 5, 26), "Phosphoric Acid", "55"),
    ];
    let report = build_report(
        &records,
        DateRange::new(date(2025, 5, 1), date(2025, 5, 31)),
        GroupBy::Daily,
        Some("PHOSPHORIC"),
    );
    assert_eq!(report.record_count, 2);
    assert_eq!(report.totals["quantity_kg"], dec("105"));
}

#[test]
fn test_blank_search_matches_everything() {
    let records = vec![
        chemical(date(2025, 5, 25), "Phosphoric Acid", "50"),
        chemical(date(2025, 5, 25), "Bleaching Earth", "80"),
    ];
    let report = build_report(
        &records,
        DateRange::new(date(2025, 5, 1), date(2025, 5, 31)),
        GroupBy::Daily,
        Some("  "),
    );
    assert_eq!(report.record_count, 2);
}

#[test]
fn test_stock_records_have_no_search_text() {
    // Stock rows carry no searchable text, so any needle filters them out
    let records = vec![stock(date(2025, 5, 25), "100", "0")];
    let report = build_report(
        &records,
        DateRange::new(date(2025, 5, 1), date(2025, 5, 31)),
        GroupBy::Daily,
        Some("cpo"),
    );
    assert_eq!(report.record_count, 0);
}

#[test]
fn test_reportable_fields_are_stable() {
    assert_eq!(
        StockRecord::FIELDS,
        &["cpo_mt", "rbd_palm_oil_mt", "olein_mt", "stearin_mt", "pfad_mt"]
    );
    assert_eq!(
        ChemicalRecord::FIELDS,
        &["quantity_kg", "feed_mt", "dosage_percent"]
    );
}
