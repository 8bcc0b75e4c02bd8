//! Numeric parsing and formatting helpers
//!
//! Operator entries arrive as free text from spreadsheet-style inputs.
//! Anything that does not parse as a number is treated as zero so a
//! half-filled sheet never blocks the derived columns from updating.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a raw operator entry, falling back to zero for blank or
/// non-numeric input
pub fn parse_or_zero(raw: &str) -> Decimal {
    Decimal::from_str(raw.trim()).unwrap_or(Decimal::ZERO)
}

/// Round for display at two decimal places
///
/// Stored values keep full precision; only rendered figures are rounded.
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp(2)
}
