//! CSV export tests for the Refinery Operations Platform
//!
//! Covers the spreadsheet rendering of a report table: one header, one
//! line per group in ascending order, and a closing TOTAL line with
//! the independent column totals.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::StockRecord;
use shared::reports::{build_report, GroupBy, ReportTable, Reportable};
use shared::types::DateRange;

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn stock(d: NaiveDate, cpo: &str) -> StockRecord {
    StockRecord {
        log_date: d,
        cpo_mt: dec(cpo),
        rbd_palm_oil_mt: Decimal::ZERO,
        olein_mt: Decimal::ZERO,
        stearin_mt: Decimal::ZERO,
        pfad_mt: Decimal::ZERO,
    }
}

/// CSV rendering applied to report downloads: header, group lines,
/// TOTAL line
fn export_to_csv(table: &ReportTable, fields: &[&str]) -> String {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["group".to_string(), "records".to_string()];
    header.extend(fields.iter().map(|f| f.to_string()));
    wtr.write_record(&header).unwrap();

    for row in &table.rows {
        let mut line = vec![row.group.clone(), row.record_count.to_string()];
        for field in fields {
            let value = row.totals.get(*field).copied().unwrap_or(Decimal::ZERO);
            line.push(value.to_string());
        }
        wtr.write_record(&line).unwrap();
    }

    let mut total_line = vec!["TOTAL".to_string(), table.record_count.to_string()];
    for field in fields {
        let value = table.totals.get(*field).copied().unwrap_or(Decimal::ZERO);
        total_line.push(value.to_string());
    }
    wtr.write_record(&total_line).unwrap();

    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

fn sample_table() -> ReportTable {
    let records = vec![
        stock(date(2025, 5, 25), "100"),
        stock(date(2025, 5, 26), "120"),
    ];
    build_report(
        &records,
        DateRange::new(date(2025, 5, 25), date(2025, 5, 26)),
        GroupBy::Daily,
        None,
    )
}

// ============================================================================
// Unit Tests for the CSV Shape
// ============================================================================

#[test]
fn test_header_names_group_and_columns() {
    let csv = export_to_csv(&sample_table(), StockRecord::FIELDS);
    let header = csv.lines().next().unwrap();
    assert_eq!(
        header,
        "group,records,cpo_mt,rbd_palm_oil_mt,olein_mt,stearin_mt,pfad_mt"
    );
}

#[test]
fn test_one_line_per_group_in_ascending_order() {
    let csv = export_to_csv(&sample_table(), StockRecord::FIELDS);
    let lines: Vec<&str> = csv.lines().collect();

    // Header, two daily groups, TOTAL
    assert_eq!(lines.len(), 4);
    assert!(lines[1].starts_with("2025-05-25,1,100"));
    assert!(lines[2].starts_with("2025-05-26,1,120"));
}

#[test]
fn test_total_line_carries_column_totals() {
    let csv = export_to_csv(&sample_table(), StockRecord::FIELDS);
    let total = csv.lines().last().unwrap();
    assert_eq!(total, "TOTAL,2,220,0,0,0,0");
}

#[test]
fn test_empty_report_still_has_header_and_total() {
    let empty = build_report(
        &Vec::<StockRecord>::new(),
        DateRange::new(date(2025, 5, 1), date(2025, 5, 31)),
        GroupBy::Daily,
        None,
    );
    let csv = export_to_csv(&empty, StockRecord::FIELDS);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1], "TOTAL,0,0,0,0,0,0");
}

#[test]
fn test_monthly_export_uses_month_keys() {
    let records = vec![
        stock(date(2025, 5, 25), "100"),
        stock(date(2025, 6, 2), "40"),
    ];
    let table = build_report(
        &records,
        DateRange::new(date(2025, 5, 1), date(2025, 6, 30)),
        GroupBy::Monthly,
        None,
    );
    let csv = export_to_csv(&table, StockRecord::FIELDS);
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[1].starts_with("2025-05,"));
    assert!(lines[2].starts_with("2025-06,"));
}
