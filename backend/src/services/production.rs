//! Packing production tracker service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::refinery::some_remarks;
use shared::forms::{FormPayload, ProductionTrackerForm};
use shared::num::parse_or_zero;
use shared::validation::parse_log_date;

/// Service for the packing production tracker
#[derive(Clone)]
pub struct ProductionService {
    db: PgPool,
}

/// A stored production tracker entry
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct ProductionLog {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub product: String,
    pub opening_wip_mt: Decimal,
    pub produced_mt: Decimal,
    pub dispatched_mt: Decimal,
    pub closing_wip_mt: Decimal,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ProductionService {
    /// Create a new ProductionService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Save one day's production entry for a product
    ///
    /// The closing WIP is recomputed from the raw entries before the
    /// entry is stored. One entry per product per day.
    pub async fn save_entry(&self, form: ProductionTrackerForm) -> AppResult<ProductionLog> {
        let form = form.recompute();
        let log_date = parse_log_date(&form.log_date).map_err(|msg| AppError::Validation {
            field: "log_date".to_string(),
            message: msg.to_string(),
        })?;

        let product = form.product.trim();
        if product.is_empty() {
            return Err(AppError::Validation {
                field: "product".to_string(),
                message: "Product name is required".to_string(),
            });
        }

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM production_logs WHERE log_date = $1 AND product = $2)",
        )
        .bind(log_date)
        .bind(product)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("log_date".to_string()));
        }

        let remarks = some_remarks(&form.remarks);
        let log = sqlx::query_as::<_, ProductionLog>(
            r#"
            INSERT INTO production_logs (
                log_date, product, opening_wip_mt, produced_mt, dispatched_mt,
                closing_wip_mt, remarks
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, log_date, product, opening_wip_mt, produced_mt, dispatched_mt,
                      closing_wip_mt, remarks, created_at
            "#,
        )
        .bind(log_date)
        .bind(product)
        .bind(parse_or_zero(&form.opening_wip_mt))
        .bind(parse_or_zero(&form.produced_mt))
        .bind(parse_or_zero(&form.dispatched_mt))
        .bind(form.closing_wip_mt)
        .bind(remarks)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(log_date = %log_date, product = %log.product, "Production entry saved");
        Ok(log)
    }

    /// List production entries, newest first
    pub async fn list_entries(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        product: Option<&str>,
    ) -> AppResult<Vec<ProductionLog>> {
        let logs = sqlx::query_as::<_, ProductionLog>(
            r#"
            SELECT id, log_date, product, opening_wip_mt, produced_mt, dispatched_mt,
                   closing_wip_mt, remarks, created_at
            FROM production_logs
            WHERE ($1::date IS NULL OR log_date >= $1)
              AND ($2::date IS NULL OR log_date <= $2)
              AND ($3::text IS NULL OR product = $3)
            ORDER BY log_date DESC, product ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(product)
        .fetch_all(&self.db)
        .await?;

        Ok(logs)
    }
}
