//! Report record types
//!
//! Log books are exchanged with clients as tagged records so a payload
//! always says which book it belongs to. Validation happens once, at
//! the boundary where a record enters the system.

use super::orders::OrderStatus;
use crate::reports::Reportable;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Daily closing stock per oil type, in metric tons
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StockRecord {
    pub log_date: NaiveDate,
    pub cpo_mt: Decimal,
    pub rbd_palm_oil_mt: Decimal,
    pub olein_mt: Decimal,
    pub stearin_mt: Decimal,
    pub pfad_mt: Decimal,
}

impl StockRecord {
    pub fn validate(&self) -> Result<(), &'static str> {
        let columns = [
            self.cpo_mt,
            self.rbd_palm_oil_mt,
            self.olein_mt,
            self.stearin_mt,
            self.pfad_mt,
        ];
        if columns.iter().any(|v| v.is_sign_negative() && !v.is_zero()) {
            return Err("Stock quantities cannot be negative");
        }
        Ok(())
    }
}

impl Reportable for StockRecord {
    const FIELDS: &'static [&'static str] = &[
        "cpo_mt",
        "rbd_palm_oil_mt",
        "olein_mt",
        "stearin_mt",
        "pfad_mt",
    ];

    fn record_date(&self) -> NaiveDate {
        self.log_date
    }

    fn field_value(&self, field: &str) -> Decimal {
        match field {
            "cpo_mt" => self.cpo_mt,
            "rbd_palm_oil_mt" => self.rbd_palm_oil_mt,
            "olein_mt" => self.olein_mt,
            "stearin_mt" => self.stearin_mt,
            "pfad_mt" => self.pfad_mt,
            _ => Decimal::ZERO,
        }
    }
}

/// One chemical consumption entry from the daily sheet
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChemicalRecord {
    pub log_date: NaiveDate,
    pub chemical: String,
    pub quantity_kg: Decimal,
    pub feed_mt: Decimal,
    pub dosage_percent: Decimal,
}

impl ChemicalRecord {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.chemical.trim().is_empty() {
            return Err("Chemical name is required");
        }
        if self.quantity_kg.is_sign_negative() && !self.quantity_kg.is_zero() {
            return Err("Chemical quantity cannot be negative");
        }
        if self.feed_mt.is_sign_negative() && !self.feed_mt.is_zero() {
            return Err("Feed quantity cannot be negative");
        }
        Ok(())
    }
}

impl Reportable for ChemicalRecord {
    const FIELDS: &'static [&'static str] = &["quantity_kg", "feed_mt", "dosage_percent"];

    fn record_date(&self) -> NaiveDate {
        self.log_date
    }

    fn field_value(&self, field: &str) -> Decimal {
        match field {
            "quantity_kg" => self.quantity_kg,
            "feed_mt" => self.feed_mt,
            "dosage_percent" => self.dosage_percent,
            _ => Decimal::ZERO,
        }
    }

    fn search_text(&self) -> String {
        self.chemical.clone()
    }
}

/// A customer order as it appears in reports
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub order_date: NaiveDate,
    pub customer: String,
    pub so_number: String,
    pub status: OrderStatus,
    pub pouch_1l_units: i64,
    pub jar_5l_units: i64,
    pub tin_15kg_units: i64,
    pub total_mt: Decimal,
}

impl OrderRecord {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.customer.trim().is_empty() {
            return Err("Customer name is required");
        }
        if self.so_number.trim().is_empty() {
            return Err("Sales order number is required");
        }
        if self.pouch_1l_units < 0 || self.jar_5l_units < 0 || self.tin_15kg_units < 0 {
            return Err("Unit counts cannot be negative");
        }
        if self.total_mt.is_sign_negative() && !self.total_mt.is_zero() {
            return Err("Order total cannot be negative");
        }
        Ok(())
    }
}

impl Reportable for OrderRecord {
    const FIELDS: &'static [&'static str] = &[
        "pouch_1l_units",
        "jar_5l_units",
        "tin_15kg_units",
        "total_mt",
    ];

    fn record_date(&self) -> NaiveDate {
        self.order_date
    }

    fn field_value(&self, field: &str) -> Decimal {
        match field {
            "pouch_1l_units" => Decimal::from(self.pouch_1l_units),
            "jar_5l_units" => Decimal::from(self.jar_5l_units),
            "tin_15kg_units" => Decimal::from(self.tin_15kg_units),
            "total_mt" => self.total_mt,
            _ => Decimal::ZERO,
        }
    }

    fn search_text(&self) -> String {
        format!("{} {} {}", self.customer, self.so_number, self.status)
    }
}

/// Any record accepted by the reporting boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportRecord {
    Stock(StockRecord),
    Chemical(ChemicalRecord),
    Order(OrderRecord),
}

impl ReportRecord {
    pub fn validate(&self) -> Result<(), &'static str> {
        match self {
            ReportRecord::Stock(r) => r.validate(),
            ReportRecord::Chemical(r) => r.validate(),
            ReportRecord::Order(r) => r.validate(),
        }
    }

    pub fn record_date(&self) -> NaiveDate {
        match self {
            ReportRecord::Stock(r) => r.log_date,
            ReportRecord::Chemical(r) => r.log_date,
            ReportRecord::Order(r) => r.order_date,
        }
    }
}
