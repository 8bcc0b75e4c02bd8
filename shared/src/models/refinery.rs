//! Refinery yield model
//!
//! The physical refining line splits CPO feed into refined oil, PFAD
//! and refining loss at fixed plant coefficients.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Share of feed leaving the line as refined oil
pub const REFINED_OIL_YIELD: Decimal = Decimal::from_parts(955, 0, 0, false, 3);

/// Share of feed stripped out as palm fatty acid distillate
pub const PFAD_YIELD: Decimal = Decimal::from_parts(39, 0, 0, false, 3);

/// Share of feed lost to gums, moisture and spent earth
pub const REFINING_LOSS: Decimal = Decimal::from_parts(6, 0, 0, false, 3);

/// Outputs of one refining run
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RefineryOutputs {
    pub refined_oil_mt: Decimal,
    pub pfad_mt: Decimal,
    pub loss_mt: Decimal,
}

/// Expected outputs for a given CPO feed
pub fn refinery_outputs(feed_mt: Decimal) -> RefineryOutputs {
    RefineryOutputs {
        refined_oil_mt: feed_mt * REFINED_OIL_YIELD,
        pfad_mt: feed_mt * PFAD_YIELD,
        loss_mt: feed_mt * REFINING_LOSS,
    }
}

/// A produced quantity as a percentage of feed
pub fn yield_percent(component_mt: Decimal, feed_mt: Decimal) -> Decimal {
    if feed_mt.is_zero() {
        Decimal::ZERO
    } else {
        (component_mt / feed_mt) * Decimal::from(100)
    }
}
