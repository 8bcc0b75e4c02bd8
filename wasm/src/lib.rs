//! WebAssembly module for the Refinery Operations Platform
//!
//! Provides client-side computation for:
//! - Tank dip to stock conversion
//! - Refinery and fractionation yields
//! - Chemical dosage percentages
//! - Meter differences and whole-form recompute

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

use shared::forms::{
    ChemicalsForm, FormPayload, FractionationForm, ProductionTrackerForm, RefineryForm, TanksForm,
};
use shared::models;
use shared::num::round2;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn dec(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or(Decimal::ZERO)
}

fn f64_of(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

/// Convert a dip reading (cm) to stock in kilograms
#[wasm_bindgen]
pub fn stock_from_dip(dip_cm: f64, calibration_kg_per_mm: f64) -> f64 {
    f64_of(models::stock_from_dip(dec(dip_cm), dec(calibration_kg_per_mm)))
}

/// Convert kilograms to metric tons, rounded for display
#[wasm_bindgen]
pub fn quantity_mt(stock_kg: f64) -> f64 {
    f64_of(round2(models::to_metric_tons(dec(stock_kg))))
}

/// Chemical dosage against the day's feed, capped at 100
#[wasm_bindgen]
pub fn dosage_percent(quantity_kg: f64, feed_mt: f64) -> f64 {
    f64_of(models::dosage_percent(dec(quantity_kg), dec(feed_mt)))
}

/// Chemical dosage without the display cap
#[wasm_bindgen]
pub fn dosage_percent_raw(quantity_kg: f64, feed_mt: f64) -> f64 {
    f64_of(models::dosage_percent_raw(dec(quantity_kg), dec(feed_mt)))
}

/// A produced quantity as a percentage of feed
#[wasm_bindgen]
pub fn yield_percent(component_mt: f64, feed_mt: f64) -> f64 {
    f64_of(models::yield_percent(dec(component_mt), dec(feed_mt)))
}

/// Difference between two consecutive meter readings
#[wasm_bindgen]
pub fn meter_difference(current: f64, previous: f64) -> f64 {
    f64_of(models::meter_difference(dec(current), dec(previous)))
}

/// Expected refinery outputs for a CPO feed, as JSON
#[wasm_bindgen]
pub fn refinery_outputs(feed_mt: f64) -> Result<String, JsValue> {
    let outputs = models::refinery_outputs(dec(feed_mt));
    serde_json::to_string(&outputs).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Expected fractionation outputs for an RBD feed, as JSON
#[wasm_bindgen]
pub fn fractionation_outputs(feed_mt: f64) -> Result<String, JsValue> {
    let outputs = models::fractionation_outputs(dec(feed_mt));
    serde_json::to_string(&outputs).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn recompute_json<P: FormPayload>(form_json: &str) -> Result<String, JsValue> {
    let form: P = serde_json::from_str(form_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid form JSON: {}", e)))?;
    serde_json::to_string(&form.recompute()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Recompute every derived column of a refinery form
#[wasm_bindgen]
pub fn recompute_refinery_form(form_json: &str) -> Result<String, JsValue> {
    recompute_json::<RefineryForm>(form_json)
}

/// Recompute every derived column of a fractionation form
#[wasm_bindgen]
pub fn recompute_fractionation_form(form_json: &str) -> Result<String, JsValue> {
    recompute_json::<FractionationForm>(form_json)
}

/// Recompute every derived column of a chemicals sheet
#[wasm_bindgen]
pub fn recompute_chemicals_form(form_json: &str) -> Result<String, JsValue> {
    recompute_json::<ChemicalsForm>(form_json)
}

/// Recompute every derived column of a tank dip sheet
#[wasm_bindgen]
pub fn recompute_tanks_form(form_json: &str) -> Result<String, JsValue> {
    recompute_json::<TanksForm>(form_json)
}

/// Recompute the closing WIP of a production tracker form
#[wasm_bindgen]
pub fn recompute_production_form(form_json: &str) -> Result<String, JsValue> {
    recompute_json::<ProductionTrackerForm>(form_json)
}
