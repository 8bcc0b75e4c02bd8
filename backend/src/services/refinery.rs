//! Refinery log book service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use shared::forms::{FormPayload, RefineryForm};
use shared::models::MeterReading;
use shared::num::parse_or_zero;
use shared::validation::parse_log_date;

/// Service for the daily refinery log book
#[derive(Clone)]
pub struct RefineryService {
    db: PgPool,
}

/// A stored refinery log entry
#[derive(Debug, Clone, Serialize)]
pub struct RefineryLog {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub cpo_feed_mt: Decimal,
    pub refined_oil_mt: Decimal,
    pub pfad_mt: Decimal,
    pub loss_mt: Decimal,
    pub cpo_meter: MeterReading,
    pub refined_oil_meter: MeterReading,
    pub deodorizer_power: MeterReading,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row for refinery log queries
#[derive(Debug, FromRow)]
struct RefineryLogRow {
    id: Uuid,
    log_date: NaiveDate,
    cpo_feed_mt: Decimal,
    refined_oil_mt: Decimal,
    pfad_mt: Decimal,
    loss_mt: Decimal,
    cpo_meter: Json<MeterReading>,
    refined_oil_meter: Json<MeterReading>,
    deodorizer_power: Json<MeterReading>,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<RefineryLogRow> for RefineryLog {
    fn from(row: RefineryLogRow) -> Self {
        Self {
            id: row.id,
            log_date: row.log_date,
            cpo_feed_mt: row.cpo_feed_mt,
            refined_oil_mt: row.refined_oil_mt,
            pfad_mt: row.pfad_mt,
            loss_mt: row.loss_mt,
            cpo_meter: row.cpo_meter.0,
            refined_oil_meter: row.refined_oil_meter.0,
            deodorizer_power: row.deodorizer_power.0,
            remarks: row.remarks,
            created_at: row.created_at,
        }
    }
}

impl RefineryService {
    /// Create a new RefineryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Save one day's refinery log
    ///
    /// Derived figures are recomputed from the raw entries before the
    /// log is stored; whatever the client sent for them is ignored.
    pub async fn save_log(&self, form: RefineryForm) -> AppResult<RefineryLog> {
        let form = form.recompute();
        let log_date = parse_log_date(&form.log_date)
            .map_err(|msg| AppError::Validation {
                field: "log_date".to_string(),
                message: msg.to_string(),
            })?;

        // One log per calendar day
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM refinery_logs WHERE log_date = $1)",
        )
        .bind(log_date)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("log_date".to_string()));
        }

        let remarks = some_remarks(&form.remarks);
        let row = sqlx::query_as::<_, RefineryLogRow>(
            r#"
            INSERT INTO refinery_logs (
                log_date, cpo_feed_mt, refined_oil_mt, pfad_mt, loss_mt,
                cpo_meter, refined_oil_meter, deodorizer_power, remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, log_date, cpo_feed_mt, refined_oil_mt, pfad_mt, loss_mt,
                      cpo_meter, refined_oil_meter, deodorizer_power, remarks, created_at
            "#,
        )
        .bind(log_date)
        .bind(parse_or_zero(&form.cpo_feed_mt))
        .bind(form.refined_oil_mt)
        .bind(form.pfad_mt)
        .bind(form.loss_mt)
        .bind(Json(&form.cpo_meter))
        .bind(Json(&form.refined_oil_meter))
        .bind(Json(&form.deodorizer_power))
        .bind(remarks)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(log_date = %log_date, "Refinery log saved");
        Ok(row.into())
    }

    /// List refinery logs, newest first
    pub async fn list_logs(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<RefineryLog>> {
        let rows = sqlx::query_as::<_, RefineryLogRow>(
            r#"
            SELECT id, log_date, cpo_feed_mt, refined_oil_mt, pfad_mt, loss_mt,
                   cpo_meter, refined_oil_meter, deodorizer_power, remarks, created_at
            FROM refinery_logs
            WHERE ($1::date IS NULL OR log_date >= $1)
              AND ($2::date IS NULL OR log_date <= $2)
            ORDER BY log_date DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(RefineryLog::from).collect())
    }

    /// Get the log for one day
    pub async fn get_log(&self, log_date: NaiveDate) -> AppResult<RefineryLog> {
        let row = sqlx::query_as::<_, RefineryLogRow>(
            r#"
            SELECT id, log_date, cpo_feed_mt, refined_oil_mt, pfad_mt, loss_mt,
                   cpo_meter, refined_oil_meter, deodorizer_power, remarks, created_at
            FROM refinery_logs
            WHERE log_date = $1
            "#,
        )
        .bind(log_date)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Refinery log".to_string()))?;

        Ok(row.into())
    }
}

/// Normalize a free-text remarks field to NULL when blank
pub(crate) fn some_remarks(remarks: &str) -> Option<String> {
    let trimmed = remarks.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
