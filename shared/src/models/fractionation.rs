//! Fractionation yield model
//!
//! Dry fractionation splits RBD palm oil into olein and stearin. The
//! plant plans on a fixed 85/15 split; actual percentages are derived
//! from the produced quantities and capped at 100.

use super::refinery::yield_percent;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Planned olein share of feed
pub const OLEIN_SPLIT: Decimal = Decimal::from_parts(85, 0, 0, false, 2);

/// Planned stearin share of feed
pub const STEARIN_SPLIT: Decimal = Decimal::from_parts(15, 0, 0, false, 2);

/// Outputs of one fractionation run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct FractionationOutputs {
    pub olein_mt: Decimal,
    pub stearin_mt: Decimal,
    pub olein_percent: Decimal,
    pub stearin_percent: Decimal,
}

/// A produced quantity as a percentage of feed, capped at 100
///
/// Produced figures can momentarily exceed feed when tank heels are
/// drained into a run, so the percentage is capped rather than
/// rejected.
pub fn capped_yield_percent(component_mt: Decimal, feed_mt: Decimal) -> Decimal {
    yield_percent(component_mt, feed_mt).min(Decimal::from(100))
}

/// Expected outputs for a given RBD palm oil feed
pub fn fractionation_outputs(feed_mt: Decimal) -> FractionationOutputs {
    let olein_mt = feed_mt * OLEIN_SPLIT;
    let stearin_mt = feed_mt * STEARIN_SPLIT;
    FractionationOutputs {
        olein_mt,
        stearin_mt,
        olein_percent: capped_yield_percent(olein_mt, feed_mt),
        stearin_percent: capped_yield_percent(stearin_mt, feed_mt),
    }
}
