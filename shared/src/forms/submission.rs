//! Legacy submission wire contract
//!
//! The old dashboard posted every form to a single endpoint with a
//! `type` discriminator mixed into the body, and read back a JSON
//! `{"status": 200}` envelope. Both shapes are kept so existing
//! clients keep working.

use serde::{Deserialize, Serialize};

use super::payloads::{
    ChemicalsForm, FormKind, FractionationForm, ProductionTrackerForm, RefineryForm, TanksForm,
};
use crate::models::find_tank;
use crate::validation::parse_log_date;

/// A form submission as it travels on the wire
///
/// Serializes to the payload's own fields plus the `type` tag.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Submission {
    Refinery(RefineryForm),
    Fractionation(FractionationForm),
    Chemicals(ChemicalsForm),
    Tanks(TanksForm),
    ProductionTracker(ProductionTrackerForm),
}

impl Submission {
    pub fn kind(&self) -> FormKind {
        match self {
            Submission::Refinery(_) => FormKind::Refinery,
            Submission::Fractionation(_) => FormKind::Fractionation,
            Submission::Chemicals(_) => FormKind::Chemicals,
            Submission::Tanks(_) => FormKind::Tanks,
            Submission::ProductionTracker(_) => FormKind::ProductionTracker,
        }
    }

    /// The raw log date field of whichever form this is
    pub fn log_date_raw(&self) -> &str {
        match self {
            Submission::Refinery(f) => &f.log_date,
            Submission::Fractionation(f) => &f.log_date,
            Submission::Chemicals(f) => &f.log_date,
            Submission::Tanks(f) => &f.log_date,
            Submission::ProductionTracker(f) => &f.log_date,
        }
    }

    /// Boundary validation applied before a submission is accepted
    ///
    /// Derived figures are never checked here; they are recomputed
    /// server-side from the raw entries.
    pub fn validate(&self) -> Result<(), &'static str> {
        parse_log_date(self.log_date_raw())?;
        match self {
            Submission::Tanks(form) => {
                for reading in &form.readings {
                    if find_tank(&reading.tank_id).is_none() {
                        return Err("Unknown tank id");
                    }
                }
            }
            Submission::Chemicals(form) => {
                for entry in &form.entries {
                    if !entry.is_empty() && entry.chemical.trim().is_empty() {
                        return Err("Chemical name is required");
                    }
                }
            }
            Submission::ProductionTracker(form) => {
                if form.product.trim().is_empty() {
                    return Err("Product name is required");
                }
            }
            Submission::Refinery(_) | Submission::Fractionation(_) => {}
        }
        Ok(())
    }
}

/// The `{"status": ...}` envelope returned by the legacy endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegacyStatus {
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LegacyStatus {
    pub fn ok() -> Self {
        Self {
            status: 200,
            message: None,
        }
    }

    pub fn error(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}
