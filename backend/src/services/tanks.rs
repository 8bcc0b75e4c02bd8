//! Tank dip sheet service

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::refinery::some_remarks;
use shared::forms::{FormPayload, TanksForm};
use shared::models::{find_tank, OilType, StockRecord, TankReading, TankSpec, TANK_TABLE};
use shared::types::DateRange;
use shared::validation::{parse_log_date, validate_tank_id};

/// Service for the daily tank dip sheet
#[derive(Clone)]
pub struct TankService {
    db: PgPool,
}

/// A stored tank dip sheet
#[derive(Debug, Clone, Serialize)]
pub struct TankLog {
    pub id: Uuid,
    pub log_date: NaiveDate,
    pub readings: Vec<TankReading>,
    pub total_stock_mt: Decimal,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Row for tank sheet queries
#[derive(Debug, FromRow)]
struct TankLogRow {
    id: Uuid,
    log_date: NaiveDate,
    readings: Json<Vec<TankReading>>,
    total_stock_mt: Decimal,
    remarks: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<TankLogRow> for TankLog {
    fn from(row: TankLogRow) -> Self {
        Self {
            id: row.id,
            log_date: row.log_date,
            readings: row.readings.0,
            total_stock_mt: row.total_stock_mt,
            remarks: row.remarks,
            created_at: row.created_at,
        }
    }
}

impl TankLog {
    /// Closing stock per oil type, in metric tons
    pub fn stock_record(&self) -> StockRecord {
        let mut record = StockRecord {
            log_date: self.log_date,
            cpo_mt: Decimal::ZERO,
            rbd_palm_oil_mt: Decimal::ZERO,
            olein_mt: Decimal::ZERO,
            stearin_mt: Decimal::ZERO,
            pfad_mt: Decimal::ZERO,
        };
        for reading in &self.readings {
            let oil_type = match find_tank(&reading.tank_id) {
                Some(spec) => spec.oil_type,
                None => continue,
            };
            match oil_type {
                OilType::CrudePalmOil => record.cpo_mt += reading.quantity_mt,
                OilType::RbdPalmOil => record.rbd_palm_oil_mt += reading.quantity_mt,
                OilType::RbdPalmOlein => record.olein_mt += reading.quantity_mt,
                OilType::RbdPalmStearin => record.stearin_mt += reading.quantity_mt,
                OilType::Pfad => record.pfad_mt += reading.quantity_mt,
            }
        }
        record
    }
}

impl TankService {
    /// Create a new TankService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// The fixed tank table, for the admin screen
    pub fn tank_specs(&self) -> &'static [TankSpec] {
        TANK_TABLE
    }

    /// Save one day's dip sheet
    ///
    /// Stock figures are recomputed from the raw dips against the tank
    /// table before storing. Negative or over-height dips are stored as
    /// entered; the sheet is only rejected for unknown tank ids.
    pub async fn save_sheet(&self, form: TanksForm) -> AppResult<TankLog> {
        let form = form.recompute();
        let log_date = parse_log_date(&form.log_date).map_err(|msg| AppError::Validation {
            field: "log_date".to_string(),
            message: msg.to_string(),
        })?;

        for reading in &form.readings {
            validate_tank_id(&reading.tank_id).map_err(|msg| AppError::Validation {
                field: "tank_id".to_string(),
                message: msg.to_string(),
            })?;
        }

        // One sheet per calendar day
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM tank_logs WHERE log_date = $1)",
        )
        .bind(log_date)
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("log_date".to_string()));
        }

        let remarks = some_remarks(&form.remarks);
        let row = sqlx::query_as::<_, TankLogRow>(
            r#"
            INSERT INTO tank_logs (log_date, readings, total_stock_mt, remarks)
            VALUES ($1, $2, $3, $4)
            RETURNING id, log_date, readings, total_stock_mt, remarks, created_at
            "#,
        )
        .bind(log_date)
        .bind(Json(&form.readings))
        .bind(form.total_stock_mt)
        .bind(remarks)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(log_date = %log_date, total_mt = %form.total_stock_mt, "Tank dip sheet saved");
        Ok(row.into())
    }

    /// List dip sheets, newest first
    pub async fn list_sheets(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> AppResult<Vec<TankLog>> {
        let rows = sqlx::query_as::<_, TankLogRow>(
            r#"
            SELECT id, log_date, readings, total_stock_mt, remarks, created_at
            FROM tank_logs
            WHERE ($1::date IS NULL OR log_date >= $1)
              AND ($2::date IS NULL OR log_date <= $2)
            ORDER BY log_date DESC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        Ok(rows.into_iter().map(TankLog::from).collect())
    }

    /// The most recent dip sheet, if any exists
    pub async fn latest_sheet(&self) -> AppResult<Option<TankLog>> {
        let row = sqlx::query_as::<_, TankLogRow>(
            r#"
            SELECT id, log_date, readings, total_stock_mt, remarks, created_at
            FROM tank_logs
            ORDER BY log_date DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(&self.db)
        .await?;

        Ok(row.map(TankLog::from))
    }

    /// Per-day closing stock per oil type for reports
    pub async fn stock_records(&self, range: DateRange) -> AppResult<Vec<StockRecord>> {
        let sheets = self.list_sheets(Some(range.start), Some(range.end)).await?;
        Ok(sheets.iter().map(TankLog::stock_record).collect())
    }
}
