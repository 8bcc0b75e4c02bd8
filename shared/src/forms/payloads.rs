//! Entry form payloads
//!
//! Each daily log book has one payload type. Raw operator entries stay
//! as text; every derived column is recomputed from scratch on each
//! edit so a payload is always internally consistent.

use crate::models::{
    closing_wip, fractionation_outputs, refinery_outputs, ChemicalEntry, MeterReading,
    ProcessMeter, TankReading, CHEMICAL_CATALOG, TANK_TABLE,
};
use crate::num::parse_or_zero;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::submission::Submission;

/// The five entry forms
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum FormKind {
    Refinery,
    Fractionation,
    Chemicals,
    Tanks,
    ProductionTracker,
}

impl FormKind {
    /// Tag carried in the legacy submission body
    pub fn wire_name(&self) -> &'static str {
        match self {
            FormKind::Refinery => "refinery",
            FormKind::Fractionation => "fractionation",
            FormKind::Chemicals => "chemicals",
            FormKind::Tanks => "tanks",
            FormKind::ProductionTracker => "production_tracker",
        }
    }

    /// Draft-store key, kept byte-for-byte compatible with the keys
    /// the old dashboard wrote to browser local storage
    pub fn draft_key(&self) -> &'static str {
        match self {
            FormKind::Refinery => "refineryForm",
            FormKind::Fractionation => "fractionationForm",
            FormKind::Chemicals => "chemicalsForm",
            FormKind::Tanks => "tanksForm",
            FormKind::ProductionTracker => "productionTrackerForm",
        }
    }
}

impl std::fmt::Display for FormKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

/// Common behaviour of the five form payloads
pub trait FormPayload:
    Clone + Default + PartialEq + Serialize + DeserializeOwned + Send + 'static
{
    const KIND: FormKind;

    /// Rebuild every derived column from the raw entries
    fn recompute(self) -> Self;

    /// Whether the operator has entered anything at all
    fn is_empty(&self) -> bool;

    fn into_submission(self) -> Submission;
}

/// Daily refinery log: CPO feed, shift meters and expected outputs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RefineryForm {
    pub log_date: String,
    pub cpo_feed_mt: String,
    pub cpo_meter: MeterReading,
    pub refined_oil_meter: MeterReading,
    pub deodorizer_power: MeterReading,
    pub refined_oil_mt: Decimal,
    pub pfad_mt: Decimal,
    pub loss_mt: Decimal,
    pub remarks: String,
}

impl Default for RefineryForm {
    fn default() -> Self {
        Self {
            log_date: String::new(),
            cpo_feed_mt: String::new(),
            cpo_meter: MeterReading::new(ProcessMeter::CpoFeed),
            refined_oil_meter: MeterReading::new(ProcessMeter::RefinedOil),
            deodorizer_power: MeterReading::new(ProcessMeter::DeodorizerPower),
            refined_oil_mt: Decimal::ZERO,
            pfad_mt: Decimal::ZERO,
            loss_mt: Decimal::ZERO,
            remarks: String::new(),
        }
    }
}

impl FormPayload for RefineryForm {
    const KIND: FormKind = FormKind::Refinery;

    fn recompute(mut self) -> Self {
        let outputs = refinery_outputs(parse_or_zero(&self.cpo_feed_mt));
        self.refined_oil_mt = outputs.refined_oil_mt;
        self.pfad_mt = outputs.pfad_mt;
        self.loss_mt = outputs.loss_mt;
        self.cpo_meter = self.cpo_meter.recompute();
        self.refined_oil_meter = self.refined_oil_meter.recompute();
        self.deodorizer_power = self.deodorizer_power.recompute();
        self
    }

    fn is_empty(&self) -> bool {
        self.log_date.trim().is_empty()
            && self.cpo_feed_mt.trim().is_empty()
            && self.cpo_meter.is_empty()
            && self.refined_oil_meter.is_empty()
            && self.deodorizer_power.is_empty()
            && self.remarks.trim().is_empty()
    }

    fn into_submission(self) -> Submission {
        Submission::Refinery(self)
    }
}

/// Daily fractionation log: RBD feed, power meter and the olein and
/// stearin split
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FractionationForm {
    pub log_date: String,
    pub rbd_feed_mt: String,
    pub fractionation_power: MeterReading,
    pub olein_mt: Decimal,
    pub stearin_mt: Decimal,
    pub olein_percent: Decimal,
    pub stearin_percent: Decimal,
    pub remarks: String,
}

impl Default for FractionationForm {
    fn default() -> Self {
        Self {
            log_date: String::new(),
            rbd_feed_mt: String::new(),
            fractionation_power: MeterReading::new(ProcessMeter::FractionationPower),
            olein_mt: Decimal::ZERO,
            stearin_mt: Decimal::ZERO,
            olein_percent: Decimal::ZERO,
            stearin_percent: Decimal::ZERO,
            remarks: String::new(),
        }
    }
}

impl FormPayload for FractionationForm {
    const KIND: FormKind = FormKind::Fractionation;

    fn recompute(mut self) -> Self {
        let outputs = fractionation_outputs(parse_or_zero(&self.rbd_feed_mt));
        self.olein_mt = outputs.olein_mt;
        self.stearin_mt = outputs.stearin_mt;
        self.olein_percent = outputs.olein_percent;
        self.stearin_percent = outputs.stearin_percent;
        self.fractionation_power = self.fractionation_power.recompute();
        self
    }

    fn is_empty(&self) -> bool {
        self.log_date.trim().is_empty()
            && self.rbd_feed_mt.trim().is_empty()
            && self.fractionation_power.is_empty()
            && self.remarks.trim().is_empty()
    }

    fn into_submission(self) -> Submission {
        Submission::Fractionation(self)
    }
}

/// Daily chemical consumption sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChemicalsForm {
    pub log_date: String,
    pub feed_mt: String,
    pub entries: Vec<ChemicalEntry>,
    pub remarks: String,
}

impl Default for ChemicalsForm {
    fn default() -> Self {
        Self {
            log_date: String::new(),
            feed_mt: String::new(),
            entries: CHEMICAL_CATALOG.iter().map(|c| ChemicalEntry::new(c)).collect(),
            remarks: String::new(),
        }
    }
}

impl FormPayload for ChemicalsForm {
    const KIND: FormKind = FormKind::Chemicals;

    fn recompute(mut self) -> Self {
        let feed = parse_or_zero(&self.feed_mt);
        self.entries = self
            .entries
            .into_iter()
            .map(|entry| entry.recompute(feed))
            .collect();
        self
    }

    fn is_empty(&self) -> bool {
        self.log_date.trim().is_empty()
            && self.feed_mt.trim().is_empty()
            && self.entries.iter().all(ChemicalEntry::is_empty)
            && self.remarks.trim().is_empty()
    }

    fn into_submission(self) -> Submission {
        Submission::Chemicals(self)
    }
}

/// Daily tank dip sheet, one row per tank in the farm
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TanksForm {
    pub log_date: String,
    pub readings: Vec<TankReading>,
    pub total_stock_mt: Decimal,
    pub remarks: String,
}

impl Default for TanksForm {
    fn default() -> Self {
        Self {
            log_date: String::new(),
            readings: TANK_TABLE.iter().map(|t| TankReading::new(t.id)).collect(),
            total_stock_mt: Decimal::ZERO,
            remarks: String::new(),
        }
    }
}

impl FormPayload for TanksForm {
    const KIND: FormKind = FormKind::Tanks;

    fn recompute(mut self) -> Self {
        self.readings = self
            .readings
            .into_iter()
            .map(TankReading::recompute)
            .collect();
        self.total_stock_mt = self.readings.iter().map(|r| r.quantity_mt).sum();
        self
    }

    fn is_empty(&self) -> bool {
        self.log_date.trim().is_empty()
            && self.readings.iter().all(TankReading::is_empty)
            && self.remarks.trim().is_empty()
    }

    fn into_submission(self) -> Submission {
        Submission::Tanks(self)
    }
}

/// Packing production tracker with work-in-progress carry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductionTrackerForm {
    pub log_date: String,
    pub product: String,
    pub opening_wip_mt: String,
    pub produced_mt: String,
    pub dispatched_mt: String,
    pub closing_wip_mt: Decimal,
    pub remarks: String,
}

impl FormPayload for ProductionTrackerForm {
    const KIND: FormKind = FormKind::ProductionTracker;

    fn recompute(mut self) -> Self {
        self.closing_wip_mt = closing_wip(
            parse_or_zero(&self.opening_wip_mt),
            parse_or_zero(&self.produced_mt),
            parse_or_zero(&self.dispatched_mt),
        );
        self
    }

    fn is_empty(&self) -> bool {
        self.log_date.trim().is_empty()
            && self.product.trim().is_empty()
            && self.opening_wip_mt.trim().is_empty()
            && self.produced_mt.trim().is_empty()
            && self.dispatched_mt.trim().is_empty()
            && self.remarks.trim().is_empty()
    }

    fn into_submission(self) -> Submission {
        Submission::ProductionTracker(self)
    }
}
