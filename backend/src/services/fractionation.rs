//! Fractionation log book service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::refinery::some_remarks;
use shared::forms::{FormPayload, FractionationForm};
use shared::models::MeterReading;
use shared::num::parse_or_zero;
use shared::validation::parse_log_date;

/// Service for the daily fractionation log book
#[derive(Clone)]
pub struct FractionationService {
    db: PgPool,
}

/// A stored fractionation log entry
#[derive(Debug, Clone, Serialize)]
pub struct FractionationLog {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub rbd_feed_mt: Decimal,
    pub olein_mt: Decimal,
    pub stearin_mt: Decimal,
    pub olein_percent: Decimal,
    pub stearin_percent: Decimal,
    pub fractionation_power: MeterReading,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row for fractionation log queries
#[derive(Debug, FromRow)]
struct FractionationLogRow {
    id: Uuid,
    log_date: NaiveDate,
    rbd_feed_mt: Decimal,
    olein_mt: Decimal,
    stearin_mt: Decimal,
    olein_percent: Decimal,
    stearin_percent: Decimal,
    fractionation_power: Json<MeterReading>,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<FractionationLogRow> for FractionationLog {
    fn from(row: FractionationLogRow) -> Self {
        Self {
            id: row.id,
            log_date: row.log_date,
            rbd_feed_mt: row.rbd_feed_mt,
            olein_mt: row.olein_mt,
            stearin_mt: row.stearin_mt,
            olein_percent: row.olein_percent,
            stearin_percent: row.stearin_percent,
            fractionation_power: row.fractionation_power.0,
            remarks: row.remarks,
            created_at: row.created_at,
        }
    }
}

impl FractionationService {
    /// Create a new FractionationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Save one day's fractionation log
    ///
    /// The olein and stearin split is recomputed from the raw feed
    /// entry before storing.
    pub async fn save_log(&self, form: FractionationForm) -> AppResult<FractionationLog> {
        let form = form.recompute();
        let log_date = parse_log_date(&form.log_date)
            .map_err(|msg| AppError::Validation {
                field: "log_date".to_string(),
                message: msg.to_string(),
            })?;

        // One log per calendar day
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM fractionation_logs WHERE log_date = $1)",
        )
        .bind(log_date)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("log_date".to_string()));
        }

        let remarks = some_remarks(&form.remarks);
        let row = sqlx::query_as::<_, FractionationLogRow>(
            r#"
            INSERT INTO fractionation_logs (
                log_date, rbd_feed_mt, olein_mt, stearin_mt,
                olein_percent, stearin_percent, fractionation_power, remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, log_date, rbd_feed_mt, olein_mt, stearin_mt,
                      olein_percent, stearin_percent, fractionation_power, remarks, created_at
            "#,
        )
        .bind(log_date)
        .bind(parse_or_zero(&form.rbd_feed_mt))
        .bind(form.olein_mt)
        .bind(form.stearin_mt)
        .bind(form.olein_percent)
        .bind(form.stearin_percent)
        .bind(Json(&form.fractionation_power))
        .bind(remarks)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(log_date = %log_date, "Fractionation log saved");
        Ok(row.into())
    }

    /// List fractionation logs, newest first
    pub async fn list_logs(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<FractionationLog>> {
        let rows = sqlx::query_as::<_, FractionationLogRow>(
            r#"
            SELECT id, log_date, rbd_feed_mt, olein_mt, stearin_mt,
                   olein_percent, stearin_percent, fractionation_power, remarks, created_at
            FROM fractionation_logs
            WHERE ($1::date IS NULL OR log_date >= $1)
              AND ($2::date IS NULL OR log_date <= $2)
            ORDER BY log_date DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(FractionationLog::from).collect())
    }
}
