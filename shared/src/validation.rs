//! Validation utilities for the Refinery Operations Platform
//!
//! Entry forms are deliberately permissive while the operator types;
//! these checks run at the boundaries where data is accepted or
//! displayed.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::{find_tank, CHEMICAL_CATALOG};

// ============================================================================
// Plant Data Validations
// ============================================================================

/// Validate that a tank id exists on the gauge board
pub fn validate_tank_id(id: &str) -> Result<(), &'static str> {
    if find_tank(id).is_some() {
        Ok(())
    } else {
        Err("Unknown tank id")
    }
}

/// Validate a dip against the tank's gauge height
pub fn validate_dip_reading(tank_id: &str, dip_cm: Decimal) -> Result<(), &'static str> {
    let spec = match find_tank(tank_id) {
        Some(spec) => spec,
        None => return Err("Unknown tank id"),
    };
    if dip_cm < Decimal::ZERO {
        return Err("Dip reading cannot be negative");
    }
    if dip_cm > Decimal::from(spec.height_cm) {
        return Err("Dip reading exceeds tank gauge height");
    }
    Ok(())
}

/// Validate a chemical name for the consumption sheet
pub fn validate_chemical_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Chemical name is required");
    }
    if name.len() > 64 {
        return Err("Chemical name must be at most 64 characters");
    }
    Ok(())
}

/// Check if a chemical is on the stocked catalog
pub fn is_catalog_chemical(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    CHEMICAL_CATALOG.iter().any(|c| c.to_lowercase() == name)
}

/// Validate a feed or production quantity
pub fn validate_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Quantity cannot be negative");
    }
    Ok(())
}

/// Check if a raw dosage figure exceeds the display cap
pub fn is_over_dosed(dosage_percent_raw: Decimal) -> bool {
    dosage_percent_raw > Decimal::from(100)
}

// ============================================================================
// General Validations
// ============================================================================

/// Parse a log date in `YYYY-MM-DD` form
pub fn parse_log_date(raw: &str) -> Result<NaiveDate, &'static str> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| "Log date must be in YYYY-MM-DD format")
}

/// Validate that a date range runs forward
pub fn validate_date_range(start: NaiveDate, end: NaiveDate) -> Result<(), &'static str> {
    if start > end {
        return Err("Range start must not be after range end");
    }
    Ok(())
}

/// Validate a customer name
pub fn validate_customer_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Customer name is required");
    }
    if name.len() > 120 {
        return Err("Customer name must be at most 120 characters");
    }
    Ok(())
}

/// Validate a sales order number
/// Format: SO-YYYY-NNNN (e.g., SO-2025-0042)
pub fn validate_so_number(so_number: &str) -> Result<(), &'static str> {
    let parts: Vec<&str> = so_number.split('-').collect();

    if parts.len() != 3 {
        return Err("Sales order number must be in format SO-YYYY-NNNN");
    }

    if parts[0] != "SO" {
        return Err("Sales order number must start with 'SO'");
    }

    if parts[1].len() != 4 || !parts[1].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid year in sales order number");
    }

    if parts[2].len() != 4 || !parts[2].chars().all(|c| c.is_ascii_digit()) {
        return Err("Invalid sequence number in sales order number");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    // ========================================================================
    // Plant Data Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_tank_id() {
        assert!(validate_tank_id("T01").is_ok());
        assert!(validate_tank_id("T10").is_ok());
        assert!(validate_tank_id("T99").is_err());
        assert!(validate_tank_id("").is_err());
    }

    #[test]
    fn test_validate_dip_reading_valid() {
        assert!(validate_dip_reading("T01", dec("0")).is_ok());
        assert!(validate_dip_reading("T01", dec("700.5")).is_ok());
        assert!(validate_dip_reading("T01", dec("1400")).is_ok());
    }

    #[test]
    fn test_validate_dip_reading_invalid() {
        assert!(validate_dip_reading("T01", dec("-1")).is_err());
        assert!(validate_dip_reading("T01", dec("1401")).is_err()); // Above gauge
        assert!(validate_dip_reading("T99", dec("10")).is_err());
    }

    #[test]
    fn test_validate_chemical_name() {
        assert!(validate_chemical_name("Phosphoric Acid").is_ok());
        assert!(validate_chemical_name("  ").is_err());
        assert!(validate_chemical_name(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_catalog_chemical_lookup_is_case_insensitive() {
        assert!(is_catalog_chemical("bleaching earth"));
        assert!(is_catalog_chemical("Phosphoric Acid "));
        assert!(!is_catalog_chemical("Sulphuric Acid"));
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(dec("0")).is_ok());
        assert!(validate_quantity(dec("120.5")).is_ok());
        assert!(validate_quantity(dec("-0.1")).is_err());
    }

    #[test]
    fn test_over_dose_flag() {
        assert!(is_over_dosed(dec("125")));
        assert!(!is_over_dosed(dec("100")));
        assert!(!is_over_dosed(dec("3.9")));
    }

    // ========================================================================
    // General Validation Tests
    // ========================================================================

    #[test]
    fn test_parse_log_date_valid() {
        assert_eq!(
            parse_log_date("2025-05-26"),
            Ok(NaiveDate::from_ymd_opt(2025, 5, 26).unwrap())
        );
        assert!(parse_log_date(" 2025-01-01 ").is_ok());
    }

    #[test]
    fn test_parse_log_date_invalid() {
        assert!(parse_log_date("26/05/2025").is_err());
        assert!(parse_log_date("2025-13-01").is_err());
        assert!(parse_log_date("").is_err());
    }

    #[test]
    fn test_validate_date_range() {
        let start = NaiveDate::from_ymd_opt(2025, 5, 25).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 5, 26).unwrap();
        assert!(validate_date_range(start, end).is_ok());
        assert!(validate_date_range(start, start).is_ok());
        assert!(validate_date_range(end, start).is_err());
    }

    #[test]
    fn test_validate_customer_name() {
        assert!(validate_customer_name("Golden Foods Ltd").is_ok());
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name(&"x".repeat(121)).is_err());
    }

    #[test]
    fn test_validate_so_number_valid() {
        assert!(validate_so_number("SO-2025-0042").is_ok());
        assert!(validate_so_number("SO-2024-9999").is_ok());
    }

    #[test]
    fn test_validate_so_number_invalid() {
        assert!(validate_so_number("SO-25-0042").is_err()); // Short year
        assert!(validate_so_number("PO-2025-0042").is_err());
        assert!(validate_so_number("SO20250042").is_err());
        assert!(validate_so_number("SO-2025-42").is_err()); // Short sequence
    }
}
