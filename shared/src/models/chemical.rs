//! Process chemical models and dosage calculation

use super::fractionation::capped_yield_percent;
use super::refinery::yield_percent;
use crate::num::parse_or_zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Chemicals stocked for the refining line
pub const CHEMICAL_CATALOG: &[&str] = &[
    "Phosphoric Acid",
    "Bleaching Earth",
    "Citric Acid",
    "Activated Carbon",
    "Filter Aid",
];

/// Dosage of a chemical against the day's feed, capped at 100
///
/// The plant quotes dosage as kilograms per metric ton of feed,
/// expressed as a percentage. Zero feed reads as zero dosage.
pub fn dosage_percent(quantity_kg: Decimal, feed_mt: Decimal) -> Decimal {
    capped_yield_percent(quantity_kg, feed_mt)
}

/// Dosage without the cap, kept alongside the display figure so
/// over-dosing stays visible in reports
pub fn dosage_percent_raw(quantity_kg: Decimal, feed_mt: Decimal) -> Decimal {
    yield_percent(quantity_kg, feed_mt)
}

/// One consumption line on the chemicals sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ChemicalEntry {
    pub chemical: String,
    pub quantity_kg: String,
    pub dosage_percent: Decimal,
    pub dosage_percent_raw: Decimal,
}

impl ChemicalEntry {
    pub fn new(chemical: &str) -> Self {
        Self {
            chemical: chemical.to_string(),
            ..Self::default()
        }
    }

    /// Recompute both dosage figures against the sheet's feed
    pub fn recompute(mut self, feed_mt: Decimal) -> Self {
        let quantity = parse_or_zero(&self.quantity_kg);
        self.dosage_percent = dosage_percent(quantity, feed_mt);
        self.dosage_percent_raw = dosage_percent_raw(quantity, feed_mt);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.quantity_kg.trim().is_empty()
    }
}
