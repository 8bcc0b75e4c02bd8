//! Chemical consumption sheet service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::refinery::some_remarks;
use shared::forms::{ChemicalsForm, FormPayload};
use shared::models::{ChemicalEntry, ChemicalRecord};
use shared::num::parse_or_zero;
use shared::types::DateRange;
use shared::validation::{parse_log_date, validate_chemical_name};

/// Service for the daily chemical consumption sheet
#[derive(Clone)]
pub struct ChemicalsService {
    db: PgPool,
}

/// A stored chemical consumption sheet
#[derive(Debug, Clone, Serialize)]
pub struct ChemicalLog {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub feed_mt: Decimal,
    pub entries: Vec<ChemicalEntry>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row for chemical sheet queries
#[derive(Debug, FromRow)]
struct ChemicalLogRow {
    id: Uuid,
    log_date: NaiveDate,
    feed_mt: Decimal,
    entries: Json<Vec<ChemicalEntry>>,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ChemicalLogRow> for ChemicalLog {
    fn from(row: ChemicalLogRow) -> Self {
        Self {
            id: row.id,
            log_date: row.log_date,
            feed_mt: row.feed_mt,
            entries: row.entries.0,
            remarks: row.remarks,
            created_at: row.created_at,
        }
    }
}

impl ChemicalsService {
    /// Create a new ChemicalsService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Save one day's chemical consumption sheet
    ///
    /// Rows the operator left blank are dropped; dosage figures are
    /// recomputed against the sheet's feed before storing.
    pub async fn save_sheet(&self, form: ChemicalsForm) -> AppResult<ChemicalLog> {
        let form = form.recompute();
        let log_date = parse_log_date(&form.log_date)
            .map_err(|msg| AppError::Validation {
                field: "log_date".to_string(),
                message: msg.to_string(),
            })?;

        let entries: Vec<ChemicalEntry> = form
            .entries
            .into_iter()
            .filter(|entry| !entry.is_empty())
            .collect();

        for entry in &entries {
            validate_chemical_name(&entry.chemical).map_err(|msg| AppError::Validation {
                field: "chemical".to_string(),
                message: msg.to_string(),
            })?;
        }

        // One sheet per calendar day
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM chemical_logs WHERE log_date = $1)",
        )
        .bind(log_date)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("log_date".to_string()));
        }

        let remarks = some_remarks(&form.remarks);
        let row = sqlx::query_as::<_, ChemicalLogRow>(
            r#"
            INSERT INTO chemical_logs (log_date, feed_mt, entries, remarks)
            VALUES ($1, $2, $3, $4)
            RETURNING id, log_date, feed_mt, entries, remarks, created_at
            "#,
        )
        .bind(log_date)
        .bind(parse_or_zero(&form.feed_mt))
        .bind(Json(&entries))
        .bind(remarks)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(log_date = %log_date, entries = entries.len(), "Chemical sheet saved");
        Ok(row.into())
    }

    /// List chemical sheets, newest first
    pub async fn list_sheets(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<ChemicalLog>> {
        let rows = sqlx::query_as::<_, ChemicalLogRow>(
            r#"
            SELECT id, log_date, feed_mt, entries, remarks, created_at
            FROM chemical_logs
            WHERE ($1::date IS NULL OR log_date >= $1)
              AND ($2::date IS NULL OR log_date <= $2)
            ORDER BY log_date DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(ChemicalLog::from).collect())
    }

    /// Flatten stored sheets into per-chemical report records
    pub async fn records(&self, range: DateRange) -> AppResult<Vec<ChemicalRecord>> {
        let sheets = self.list_sheets(Some(range.start), Some(range.end)).await?;

        let mut records = Vec::new();
        for sheet in sheets {
            for entry in sheet.entries {
                records.push(ChemicalRecord {
                    log_date: sheet.log_date,
                    chemical: entry.chemical,
                    quantity_kg: parse_or_zero(&entry.quantity_kg),
                    feed_mt: sheet.feed_mt,
                    dosage_percent: entry.dosage_percent,
                });
            }
        }
        Ok(records)
    }
}
