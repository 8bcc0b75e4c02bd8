//! Reporting service for summaries, chart series and CSV export
//!
//! Stored log books are flattened into report records and fed through
//! the shared aggregation engine; the service only decides which rows
//! to fetch and how to present the result.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::services::chemicals::ChemicalsService;
use crate::services::orders::OrderService;
use crate::services::tanks::TankService;
use shared::reports::{build_report, GroupBy, ReportTable, Reportable};
use shared::types::DateRange;
use shared::validation::validate_date_range;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    db: PgPool,
}

/// Which log book a report covers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    Stocks,
    Chemicals,
    Orders,
}

/// Report query parameters
#[derive(Debug, Clone, Deserialize)]
pub struct ReportQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub group_by: GroupBy,
    pub search: Option<String>,
}

/// One point on a dashboard chart
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub group: String,
    pub value: Decimal,
}

/// Summary cards for the dashboard landing page
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub latest_stock_date: Option<NaiveDate>,
    pub total_stock_mt: Decimal,
    pub open_orders: i64,
    pub month_to_date_cpo_mt: Decimal,
}

impl ReportingService {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    fn range(&self, query: &ReportQuery) -> AppResult<DateRange> {
        validate_date_range(query.start_date, query.end_date)
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;
        Ok(DateRange::new(query.start_date, query.end_date))
    }

    /// Build the report table for one log book
    pub async fn report(&self, kind: ReportKind, query: &ReportQuery) -> AppResult<ReportTable> {
        let range = self.range(query)?;
        let search = query.search.as_deref();

        let table = match kind {
            ReportKind::Stocks => {
                let records = TankService::new(self.db.clone()).stock_records(range).await?;
                build_report(&records, range, query.group_by, search)
            }
            ReportKind::Chemicals => {
                let records = ChemicalsService::new(self.db.clone()).records(range).await?;
                build_report(&records, range, query.group_by, search)
            }
            ReportKind::Orders => {
                let records = OrderService::new(self.db.clone()).records(range).await?;
                build_report(&records, range, query.group_by, search)
            }
        };

        Ok(table)
    }

    /// Chart series for one numeric column of a report
    pub async fn series(
        &self,
        kind: ReportKind,
        query: &ReportQuery,
        field: &str,
    ) -> AppResult<Vec<SeriesPoint>> {
        let table = self.report(kind, query).await?;
        Ok(table
            .rows
            .into_iter()
            .map(|row| SeriesPoint {
                value: row.totals.get(field).copied().unwrap_or(Decimal::ZERO),
                group: row.group,
            })
            .collect())
    }

    /// Summary cards for the dashboard landing page
    pub async fn dashboard_summary(&self, today: NaiveDate) -> AppResult<DashboardSummary> {
        let tanks = TankService::new(self.db.clone());
        let orders = OrderService::new(self.db.clone());

        let latest = tanks.latest_sheet().await?;
        let (latest_stock_date, total_stock_mt) = match &latest {
            Some(sheet) => (Some(sheet.log_date), sheet.total_stock_mt),
            None => (None, Decimal::ZERO),
        };

        let mtd = tanks
            .stock_records(DateRange::month_to_date(today))
            .await?;
        let month_to_date_cpo_mt = mtd.iter().map(|r| r.cpo_mt).sum();

        Ok(DashboardSummary {
            latest_stock_date,
            total_stock_mt,
            open_orders: orders.open_order_count().await?,
            month_to_date_cpo_mt,
        })
    }

    /// Render a report table as CSV: header, one line per group, and
    /// the independent column totals as a TOTAL line
    pub fn export_to_csv(table: &ReportTable, fields: &[&str]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        let mut header = vec!["group".to_string(), "records".to_string()];
        header.extend(fields.iter().map(|f| f.to_string()));
        wtr.write_record(&header)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;

        for row in &table.rows {
            let mut line = vec![row.group.clone(), row.record_count.to_string()];
            for field in fields {
                let value = row.totals.get(*field).copied().unwrap_or(Decimal::ZERO);
                line.push(value.to_string());
            }
            wtr.write_record(&line)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }

        let mut total_line = vec!["TOTAL".to_string(), table.record_count.to_string()];
        for field in fields {
            let value = table.totals.get(*field).copied().unwrap_or(Decimal::ZERO);
            total_line.push(value.to_string());
        }
        wtr.write_record(&total_line)
            .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;

        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }

    /// Column list for one report kind, in display order
    pub fn fields(kind: ReportKind) -> &'static [&'static str] {
        match kind {
            ReportKind::Stocks => shared::models::StockRecord::FIELDS,
            ReportKind::Chemicals => shared::models::ChemicalRecord::FIELDS,
            ReportKind::Orders => shared::models::OrderRecord::FIELDS,
        }
    }
}
