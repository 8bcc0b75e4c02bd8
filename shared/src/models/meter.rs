//! Process meter models

use crate::num::parse_or_zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Meters read at the start and end of every shift
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ProcessMeter {
    CpoFeed,
    RefinedOil,
    DeodorizerPower,
    FractionationPower,
}

impl std::fmt::Display for ProcessMeter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessMeter::CpoFeed => write!(f, "CPO Feed Meter"),
            ProcessMeter::RefinedOil => write!(f, "Refined Oil Meter"),
            ProcessMeter::DeodorizerPower => write!(f, "Deodorizer Power Meter"),
            ProcessMeter::FractionationPower => write!(f, "Fractionation Power Meter"),
        }
    }
}

/// Difference between two consecutive meter readings
///
/// Negative results are legitimate: totaliser rollovers and meter
/// replacements both show up as a current value below the previous one.
pub fn meter_difference(current: Decimal, previous: Decimal) -> Decimal {
    current - previous
}

/// A pair of consecutive readings for one meter, with the derived
/// consumption
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeterReading {
    pub meter: ProcessMeter,
    pub current: String,
    pub previous: String,
    pub difference: Decimal,
}

impl MeterReading {
    pub fn new(meter: ProcessMeter) -> Self {
        Self {
            meter,
            current: String::new(),
            previous: String::new(),
            difference: Decimal::ZERO,
        }
    }

    /// Recompute the difference from the raw entries
    pub fn recompute(mut self) -> Self {
        self.difference =
            meter_difference(parse_or_zero(&self.current), parse_or_zero(&self.previous));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.current.trim().is_empty() && self.previous.trim().is_empty()
    }
}
