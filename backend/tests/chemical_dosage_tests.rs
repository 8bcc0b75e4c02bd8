//! Chemical dosage tests for the Refinery Operations Platform
//!
//! Covers the dosage percentage pair (capped display figure plus the
//! raw figure kept for over-dose reporting) and the consumption sheet
//! rows built from operator text.

use proptest::prelude::*;
use rust_decimal::Decimal;
use std::str::FromStr;

use shared::models::{dosage_percent, dosage_percent_raw, ChemicalEntry, CHEMICAL_CATALOG};
use shared::validation::{is_catalog_chemical, is_over_dosed};

/// Helper to create Decimal from string
fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

// ============================================================================
// Property: Dosage Percentage
// ============================================================================
// For quantity Q (kg) and feed F (MT), raw dosage SHALL equal
// (Q / F) × 100 and the display dosage SHALL be the same figure capped
// at 100. Zero feed reads as zero for both.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Raw dosage follows the formula exactly
    #[test]
    fn property_raw_dosage_formula(quantity in 0u32..10_000, feed in 1u32..5_000) {
        let quantity = Decimal::from(quantity);
        let feed = Decimal::from(feed);

        prop_assert_eq!(
            dosage_percent_raw(quantity, feed),
            (quantity / feed) * Decimal::from(100)
        );
    }

    /// Display dosage is min(raw, 100)
    #[test]
    fn property_display_dosage_is_capped_raw(quantity in 0u32..10_000, feed in 1u32..5_000) {
        let quantity = Decimal::from(quantity);
        let feed = Decimal::from(feed);

        let raw = dosage_percent_raw(quantity, feed);
        prop_assert_eq!(dosage_percent(quantity, feed), raw.min(Decimal::from(100)));
    }

    /// Zero feed never divides
    #[test]
    fn property_zero_feed_reads_zero(quantity in 0u32..10_000) {
        let quantity = Decimal::from(quantity);
        prop_assert_eq!(dosage_percent(quantity, Decimal::ZERO), Decimal::ZERO);
        prop_assert_eq!(dosage_percent_raw(quantity, Decimal::ZERO), Decimal::ZERO);
    }

    /// The over-dose flag agrees with the raw figure
    #[test]
    fn property_over_dose_flag(quantity in 0u32..10_000, feed in 1u32..5_000) {
        let raw = dosage_percent_raw(Decimal::from(quantity), Decimal::from(feed));
        prop_assert_eq!(is_over_dosed(raw), raw > Decimal::from(100));
    }
}

// ============================================================================
// Unit Tests for the Consumption Sheet
// ============================================================================

#[test]
fn test_dosage_pair_above_cap() {
    // 50 kg into a 40 MT feed: display 100, raw 125
    assert_eq!(dosage_percent(dec("50"), dec("40")), dec("100"));
    assert_eq!(dosage_percent_raw(dec("50"), dec("40")), dec("125"));
}

#[test]
fn test_dosage_below_cap_matches_raw() {
    assert_eq!(dosage_percent(dec("20"), dec("40")), dec("50"));
    assert_eq!(dosage_percent_raw(dec("20"), dec("40")), dec("50"));
}

#[test]
fn test_entry_recompute_from_raw_text() {
    let entry = ChemicalEntry {
        chemical: "Bleaching Earth".to_string(),
        quantity_kg: " 50 ".to_string(),
        ..ChemicalEntry::default()
    }
    .recompute(dec("40"));
    assert_eq!(entry.dosage_percent, dec("100"));
    assert_eq!(entry.dosage_percent_raw, dec("125"));
}

#[test]
fn test_entry_with_non_numeric_quantity_reads_zero() {
    let entry = ChemicalEntry {
        chemical: "Citric Acid".to_string(),
        quantity_kg: "tbd".to_string(),
        ..ChemicalEntry::default()
    }
    .recompute(dec("40"));
    assert_eq!(entry.dosage_percent, Decimal::ZERO);
    assert_eq!(entry.dosage_percent_raw, Decimal::ZERO);
}

#[test]
fn test_blank_entry_is_empty() {
    let entry = ChemicalEntry::new("Filter Aid");
    assert!(entry.is_empty());

    let entry = ChemicalEntry {
        quantity_kg: "5".to_string(),
        ..ChemicalEntry::new("Filter Aid")
    };
    assert!(!entry.is_empty());
}

#[test]
fn test_catalog_covers_the_refining_line() {
    assert_eq!(CHEMICAL_CATALOG.len(), 5);
    for name in CHEMICAL_CATALOG {
        assert!(is_catalog_chemical(name), "{} missing from catalog", name);
    }
    assert!(!is_catalog_chemical("Sulphuric Acid"));
}
