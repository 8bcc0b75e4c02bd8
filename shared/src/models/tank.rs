//! Storage tank models and dip-to-stock conversion

use crate::num::parse_or_zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Oil types handled by the plant
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OilType {
    CrudePalmOil,
    RbdPalmOil,
    RbdPalmOlein,
    RbdPalmStearin,
    Pfad,
}

impl OilType {
    pub fn code(&self) -> &'static str {
        match self {
            OilType::CrudePalmOil => "cpo",
            OilType::RbdPalmOil => "rbd_palm_oil",
            OilType::RbdPalmOlein => "olein",
            OilType::RbdPalmStearin => "stearin",
            OilType::Pfad => "pfad",
        }
    }
}

impl std::fmt::Display for OilType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OilType::CrudePalmOil => write!(f, "Crude Palm Oil"),
            OilType::RbdPalmOil => write!(f, "RBD Palm Oil"),
            OilType::RbdPalmOlein => write!(f, "RBD Palm Olein"),
            OilType::RbdPalmStearin => write!(f, "RBD Palm Stearin"),
            OilType::Pfad => write!(f, "PFAD"),
        }
    }
}

/// Fixed gauge data for one storage tank
///
/// The calibration factor is the mass of oil per millimetre of dip,
/// taken from the tank's strapping chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TankSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub oil_type: OilType,
    pub height_cm: u32,
    pub calibration_kg_per_mm: Decimal,
    pub capacity_mt: Decimal,
}

const fn whole(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 0)
}

/// The plant's tank farm
pub const TANK_TABLE: &[TankSpec] = &[
    TankSpec {
        id: "T01",
        label: "CPO Storage Tank 1",
        oil_type: OilType::CrudePalmOil,
        height_cm: 1400,
        calibration_kg_per_mm: whole(71),
        capacity_mt: whole(994),
    },
    TankSpec {
        id: "T02",
        label: "CPO Storage Tank 2",
        oil_type: OilType::CrudePalmOil,
        height_cm: 1400,
        calibration_kg_per_mm: whole(71),
        capacity_mt: whole(994),
    },
    TankSpec {
        id: "T03",
        label: "CPO Storage Tank 3",
        oil_type: OilType::CrudePalmOil,
        height_cm: 1200,
        calibration_kg_per_mm: whole(58),
        capacity_mt: whole(696),
    },
    TankSpec {
        id: "T04",
        label: "CPO Day Tank",
        oil_type: OilType::CrudePalmOil,
        height_cm: 900,
        calibration_kg_per_mm: whole(24),
        capacity_mt: whole(216),
    },
    TankSpec {
        id: "T05",
        label: "RBD Palm Oil Tank 1",
        oil_type: OilType::RbdPalmOil,
        height_cm: 1100,
        calibration_kg_per_mm: whole(46),
        capacity_mt: whole(506),
    },
    TankSpec {
        id: "T06",
        label: "RBD Palm Oil Tank 2",
        oil_type: OilType::RbdPalmOil,
        height_cm: 1100,
        calibration_kg_per_mm: whole(46),
        capacity_mt: whole(506),
    },
    TankSpec {
        id: "T07",
        label: "Olein Tank 1",
        oil_type: OilType::RbdPalmOlein,
        height_cm: 1250,
        calibration_kg_per_mm: whole(52),
        capacity_mt: whole(650),
    },
    TankSpec {
        id: "T08",
        label: "Olein Tank 2",
        oil_type: OilType::RbdPalmOlein,
        height_cm: 1250,
        calibration_kg_per_mm: whole(52),
        capacity_mt: whole(650),
    },
    TankSpec {
        id: "T09",
        label: "Stearin Tank",
        oil_type: OilType::RbdPalmStearin,
        height_cm: 800,
        calibration_kg_per_mm: whole(30),
        capacity_mt: whole(240),
    },
    TankSpec {
        id: "T10",
        label: "PFAD Tank",
        oil_type: OilType::Pfad,
        height_cm: 750,
        calibration_kg_per_mm: whole(18),
        capacity_mt: whole(135),
    },
];

/// Look up a tank by its gauge-board id
pub fn find_tank(id: &str) -> Option<&'static TankSpec> {
    TANK_TABLE.iter().find(|t| t.id == id)
}

/// Convert a dip reading to stock in kilograms
///
/// The dip is measured in centimetres while the calibration factor is
/// per millimetre, hence the factor of ten.
pub fn stock_from_dip(dip_cm: Decimal, calibration_kg_per_mm: Decimal) -> Decimal {
    dip_cm * calibration_kg_per_mm * Decimal::from(10)
}

/// Convert kilograms to metric tons
pub fn to_metric_tons(kilograms: Decimal) -> Decimal {
    kilograms / Decimal::from(1000)
}

/// One dip entry for a tank, with its derived stock figures
///
/// `dip_cm` keeps the operator's raw text so a draft restores exactly
/// as it was typed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TankReading {
    pub tank_id: String,
    pub dip_cm: String,
    pub stock_kg: Decimal,
    pub quantity_mt: Decimal,
}

impl TankReading {
    pub fn new(tank_id: &str) -> Self {
        Self {
            tank_id: tank_id.to_string(),
            ..Self::default()
        }
    }

    /// Recompute stock from the raw dip entry
    ///
    /// Unknown tank ids yield zero stock rather than an error so one
    /// bad row never blocks the rest of the sheet.
    pub fn recompute(mut self) -> Self {
        let calibration = find_tank(&self.tank_id)
            .map(|t| t.calibration_kg_per_mm)
            .unwrap_or(Decimal::ZERO);
        self.stock_kg = stock_from_dip(parse_or_zero(&self.dip_cm), calibration);
        self.quantity_mt = to_metric_tons(self.stock_kg);
        self
    }

    /// Stock as a share of tank capacity, for gauge displays and alerts
    pub fn fill_percent(&self) -> Decimal {
        match find_tank(&self.tank_id) {
            Some(spec) if !spec.capacity_mt.is_zero() => {
                (self.quantity_mt / spec.capacity_mt) * Decimal::from(100)
            }
            _ => Decimal::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.dip_cm.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_stock_from_dip() {
        // 10 cm at 71 kg/mm is 7100 kg
        assert_eq!(stock_from_dip(dec("10"), dec("71")), dec("7100"));
    }

    #[test]
    fn test_to_metric_tons() {
        assert_eq!(to_metric_tons(dec("7100")), dec("7.1"));
    }

    #[test]
    fn test_reading_recompute_uses_tank_calibration() {
        let reading = TankReading {
            tank_id: "T01".to_string(),
            dip_cm: "10".to_string(),
            ..TankReading::default()
        }
        .recompute();
        assert_eq!(reading.stock_kg, dec("7100"));
        assert_eq!(reading.quantity_mt, dec("7.1"));
    }

    #[test]
    fn test_reading_with_unknown_tank_is_zero() {
        let reading = TankReading {
            tank_id: "T99".to_string(),
            dip_cm: "10".to_string(),
            ..TankReading::default()
        }
        .recompute();
        assert_eq!(reading.stock_kg, Decimal::ZERO);
    }

    #[test]
    fn test_capacity_matches_gauge_height() {
        for spec in TANK_TABLE {
            let full = to_metric_tons(stock_from_dip(
                Decimal::from(spec.height_cm),
                spec.calibration_kg_per_mm,
            ));
            assert_eq!(full, spec.capacity_mt, "tank {}", spec.id);
        }
    }
}
