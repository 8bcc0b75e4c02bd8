//! Legacy submission tests for the Refinery Operations Platform
//!
//! Covers the type-tagged wire format the old dashboard posts, the
//! boundary validation applied on intake and the `{"status": ...}`
//! envelope returned over HTTP 200.

use proptest::prelude::*;
use serde_json::json;

use shared::forms::{
    ChemicalsForm, FormKind, FormPayload, FractionationForm, LegacyStatus,
    ProductionTrackerForm, RefineryForm, Submission, TanksForm,
};

/// Body-envelope status for a rejected submission, as the legacy
/// endpoint maps intake failures
fn legacy_status(kind: &str) -> u16 {
    match kind {
        "validation" => 400,
        "not_found" => 404,
        "duplicate" => 409,
        _ => 500,
    }
}

// ============================================================================
// Property: Wire Format Round Trip
// ============================================================================
// Any submission serialized to the wire SHALL carry its `type` tag next
// to the form fields and deserialize back to an equal value.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Refinery submissions survive the wire unchanged
    #[test]
    fn property_refinery_round_trip(feed in 0u32..10_000, day in 1u32..28) {
        let form = RefineryForm {
            log_date: format!("2025-05-{:02}", day),
            cpo_feed_mt: feed.to_string(),
            ..RefineryForm::default()
        }
        .recompute();
        let original = form.into_submission();

        let wire = serde_json::to_string(&original).unwrap();
        let parsed: Submission = serde_json::from_str(&wire).unwrap();
        prop_assert_eq!(parsed, original);
    }

    /// The tag always matches the payload kind
    #[test]
    fn property_tag_matches_kind(day in 1u32..28) {
        let log_date = format!("2025-05-{:02}", day);
        let submissions = vec![
            RefineryForm { log_date: log_date.clone(), ..RefineryForm::default() }.into_submission(),
            FractionationForm { log_date: log_date.clone(), ..FractionationForm::default() }.into_submission(),
            ChemicalsForm { log_date: log_date.clone(), ..ChemicalsForm::default() }.into_submission(),
            TanksForm { log_date: log_date.clone(), ..TanksForm::default() }.into_submission(),
            ProductionTrackerForm { log_date, ..ProductionTrackerForm::default() }.into_submission(),
        ];
        for submission in submissions {
            let wire = serde_json::to_value(&submission).unwrap();
            prop_assert_eq!(wire["type"].as_str().unwrap(), submission.kind().wire_name());
        }
    }
}

// ============================================================================
// Unit Tests for the Wire Format
// ============================================================================

#[test]
fn test_type_tag_rides_with_form_fields() {
    let form = RefineryForm {
        log_date: "2025-05-26".to_string(),
        cpo_feed_mt: "100".to_string(),
        ..RefineryForm::default()
    }
    .recompute();
    let wire = serde_json::to_value(form.into_submission()).unwrap();

    assert_eq!(wire["type"], "refinery");
    assert_eq!(wire["log_date"], "2025-05-26");
    assert_eq!(wire["refined_oil_mt"], "95.500");
}

#[test]
fn test_wire_names_are_snake_case() {
    assert_eq!(FormKind::Refinery.wire_name(), "refinery");
    assert_eq!(FormKind::ProductionTracker.wire_name(), "production_tracker");
}

#[test]
fn test_untagged_body_is_rejected() {
    let body = json!({"log_date": "2025-05-26", "cpo_feed_mt": "100"});
    assert!(serde_json::from_value::<Submission>(body).is_err());
}

#[test]
fn test_unknown_tag_is_rejected() {
    let body = json!({"type": "boiler", "log_date": "2025-05-26"});
    assert!(serde_json::from_value::<Submission>(body).is_err());
}

// ============================================================================
// Unit Tests for Intake Validation
// ============================================================================

#[test]
fn test_missing_log_date_fails() {
    let submission = RefineryForm::default().into_submission();
    assert!(submission.validate().is_err());
}

#[test]
fn test_malformed_log_date_fails() {
    let submission = RefineryForm {
        log_date: "26/05/2025".to_string(),
        ..RefineryForm::default()
    }
    .into_submission();
    assert!(submission.validate().is_err());
}

#[test]
fn test_unknown_tank_id_fails() {
    let mut form = TanksForm {
        log_date: "2025-05-26".to_string(),
        ..TanksForm::default()
    };
    form.readings[0].tank_id = "T99".to_string();
    assert_eq!(form.into_submission().validate(), Err("Unknown tank id"));
}

#[test]
fn test_production_tracker_needs_a_product() {
    let submission = ProductionTrackerForm {
        log_date: "2025-05-26".to_string(),
        ..ProductionTrackerForm::default()
    }
    .into_submission();
    assert_eq!(submission.validate(), Err("Product name is required"));

    let submission = ProductionTrackerForm {
        log_date: "2025-05-26".to_string(),
        product: "Olein 1L Pouch".to_string(),
        ..ProductionTrackerForm::default()
    }
    .into_submission();
    assert!(submission.validate().is_ok());
}

#[test]
fn test_derived_figures_are_not_validated() {
    // Derived columns are recomputed server-side; a stale figure in the
    // body must not fail intake
    let mut form = RefineryForm {
        log_date: "2025-05-26".to_string(),
        cpo_feed_mt: "100".to_string(),
        ..RefineryForm::default()
    };
    form.refined_oil_mt = rust_decimal::Decimal::from(999);
    assert!(form.into_submission().validate().is_ok());
}

// ============================================================================
// Unit Tests for the Status Envelope
// ============================================================================

#[test]
fn test_ok_envelope_shape() {
    let ok = serde_json::to_value(LegacyStatus::ok()).unwrap();
    assert_eq!(ok, json!({"status": 200}));
    assert!(LegacyStatus::ok().is_ok());
}

#[test]
fn test_error_envelope_carries_message() {
    let envelope = LegacyStatus::error(409, "Duplicate log date");
    assert!(!envelope.is_ok());

    let wire = serde_json::to_value(&envelope).unwrap();
    assert_eq!(wire["status"], 409);
    assert_eq!(wire["message"], "Duplicate log date");
}

#[test]
fn test_intake_failures_map_to_envelope_statuses() {
    assert_eq!(legacy_status("validation"), 400);
    assert_eq!(legacy_status("not_found"), 404);
    assert_eq!(legacy_status("duplicate"), 409);
    assert_eq!(legacy_status("database"), 500);
}
