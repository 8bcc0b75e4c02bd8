//! Customer order models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Order lifecycle states
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    InTransit,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InTransit => "in_transit",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OrderStatus::Pending),
            "in_transit" => Some(OrderStatus::InTransit),
            "delivered" => Some(OrderStatus::Delivered),
            "cancelled" => Some(OrderStatus::Cancelled),
            _ => None,
        }
    }

    /// Whether the order still counts toward the pending book
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::InTransit)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::InTransit => write!(f, "In Transit"),
            OrderStatus::Delivered => write!(f, "Delivered"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// A customer order, on either the pending or the dispatch book
///
/// Unit counts are per pack size; `total_mt` is the commercial total
/// from the sales order, not derived from the counts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: Uuid,
    pub order_date: NaiveDate,
    pub customer: String,
    pub so_number: String,
    pub status: OrderStatus,
    pub pouch_1l_units: i64,
    pub jar_5l_units: i64,
    pub tin_15kg_units: i64,
    pub total_mt: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Input for creating or amending an order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderInput {
    pub order_date: NaiveDate,
    #[validate(length(min = 1, max = 120, message = "Customer name must be 1-120 characters"))]
    pub customer: String,
    #[validate(length(min = 1, max = 20, message = "Sales order number is required"))]
    pub so_number: String,
    pub status: OrderStatus,
    #[validate(range(min = 0, message = "Unit counts cannot be negative"))]
    pub pouch_1l_units: i64,
    #[validate(range(min = 0, message = "Unit counts cannot be negative"))]
    pub jar_5l_units: i64,
    #[validate(range(min = 0, message = "Unit counts cannot be negative"))]
    pub tin_15kg_units: i64,
    pub total_mt: Decimal,
}
