//! Submission intake
//!
//! Single entry point for the five log books. The legacy endpoint and
//! the per-book REST routes both land here so boundary validation and
//! the duplicate-day rule are applied in one place.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::chemicals::ChemicalsService;
use crate::services::fractionation::FractionationService;
use crate::services::production::ProductionService;
use crate::services::refinery::RefineryService;
use crate::services::tanks::TankService;
use shared::forms::{FormKind, Submission};

/// Service accepting form submissions for all five log books
#[derive(Clone)]
pub struct IntakeService {
    db: PgPool,
}

/// Receipt for an accepted submission
#[derive(Debug, Clone, Serialize)]
pub struct IntakeReceipt {
    pub id: Uuid,
    pub kind: FormKind,
    pub log_date: chrono::NaiveDate,
}

impl IntakeService {
    /// Create a new IntakeService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Validate and persist one submission
    pub async fn accept(&self, submission: Submission) -> AppResult<IntakeReceipt> {
        submission
            .validate()
            .map_err(|msg| AppError::ValidationError(msg.to_string()))?;

        let kind = submission.kind();
        let receipt = match submission {
            Submission::Refinery(form) => {
                let log = RefineryService::new(self.db.clone()).save_log(form).await?;
                IntakeReceipt {
                    id: log.id,
                    kind,
                    log_date: log.log_date,
                }
            }
            Submission::Fractionation(form) => {
                let log = FractionationService::new(self.db.clone())
                    .save_log(form)
                    .await?;
                IntakeReceipt {
                    id: log.id,
                    kind,
                    log_date: log.log_date,
                }
            }
            Submission::Chemicals(form) => {
                let log = ChemicalsService::new(self.db.clone())
                    .save_sheet(form)
                    .await?;
                IntakeReceipt {
                    id: log.id,
                    kind,
                    log_date: log.log_date,
                }
            }
            Submission::Tanks(form) => {
                let log = TankService::new(self.db.clone()).save_sheet(form).await?;
                IntakeReceipt {
                    id: log.id,
                    kind,
                    log_date: log.log_date,
                }
            }
            Submission::ProductionTracker(form) => {
                let log = ProductionService::new(self.db.clone())
                    .save_entry(form)
                    .await?;
                IntakeReceipt {
                    id: log.id,
                    kind,
                    log_date: log.log_date,
                }
            }
        };

        tracing::debug!(kind = %receipt.kind, log_date = %receipt.log_date, "Submission accepted");
        Ok(receipt)
    }
}
