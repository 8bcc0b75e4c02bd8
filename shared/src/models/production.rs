//! Packing production models

use rust_decimal::Decimal;

/// Packed products shipped from the plant
pub const PRODUCT_CATALOG: &[&str] = &[
    "Olein 1L Pouch",
    "Olein 5L Jar",
    "RBD Palm Oil 15kg Tin",
    "Stearin Bulk",
];

/// Closing work-in-progress after a production day
///
/// Opening WIP plus production, less dispatches. Negative closings are
/// kept as entered.
pub fn closing_wip(opening_wip_mt: Decimal, produced_mt: Decimal, dispatched_mt: Decimal) -> Decimal {
    opening_wip_mt + produced_mt - dispatched_mt
}
