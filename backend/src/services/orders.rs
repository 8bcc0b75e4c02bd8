//! Customer order book service

use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{Order, OrderInput, OrderRecord, OrderStatus};
use shared::types::DateRange;

/// Service for the pending and dispatch order books
#[derive(Clone)]
pub struct OrderService {
    db: PgPool,
}

/// Row for order queries; status is stored as its wire string
#[derive(Debug, FromRow)]
struct OrderRow {
    id: Uuid,
    order_date: NaiveDate,
    customer: String,
    so_number: String,
    status: String,
    pouch_1l_units: i64,
    jar_5l_units: i64,
    tin_15kg_units: i64,
    total_mt: rust_decimal::Decimal,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = AppError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let status = OrderStatus::parse(&row.status)
            .ok_or_else(|| AppError::Internal(format!("Unknown order status '{}'", row.status)))?;
        Ok(Order {
            id: row.id,
            order_date: row.order_date,
            customer: row.customer,
            so_number: row.so_number,
            status,
            pouch_1l_units: row.pouch_1l_units,
            jar_5l_units: row.jar_5l_units,
            tin_15kg_units: row.tin_15kg_units,
            total_mt: row.total_mt,
            created_at: row.created_at,
        })
    }
}

const ORDER_COLUMNS: &str = "id, order_date, customer, so_number, status, \
     pouch_1l_units, jar_5l_units, tin_15kg_units, total_mt, created_at";

impl OrderService {
    /// Create a new OrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a new customer order
    pub async fn create_order(&self, input: OrderInput) -> AppResult<Order> {
        input
            .validate()
            .map_err(|e| AppError::ValidationError(e.to_string()))?;

        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM orders WHERE so_number = $1)",
        )
        .bind(input.so_number.trim())
        .fetch_one(&self.db)
        .await?;

        if exists {
            return Err(AppError::DuplicateEntry("so_number".to_string()));
        }

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            INSERT INTO orders (
                order_date, customer, so_number, status,
                pouch_1l_units, jar_5l_units, tin_15kg_units, total_mt
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(input.order_date)
        .bind(input.customer.trim())
        .bind(input.so_number.trim())
        .bind(input.status.as_str())
        .bind(input.pouch_1l_units)
        .bind(input.jar_5l_units)
        .bind(input.tin_15kg_units)
        .bind(input.total_mt)
        .fetch_one(&self.db)
        .await?;

        let order = Order::try_from(row)?;
        tracing::info!(so_number = %order.so_number, status = %order.status, "Order recorded");
        Ok(order)
    }

    /// Get one order
    pub async fn get_order(&self, id: Uuid) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        Order::try_from(row)
    }

    /// List orders, newest first, optionally narrowed to one status
    pub async fn list_orders(
        &self,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
        status: Option<OrderStatus>,
    ) -> AppResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE ($1::date IS NULL OR order_date >= $1)
              AND ($2::date IS NULL OR order_date <= $2)
              AND ($3::text IS NULL OR status = $3)
            ORDER BY order_date DESC, created_at DESC
            "#
        ))
        .bind(from)
        .bind(to)
        .bind(status.map(|s| s.as_str()))
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Move an order to a new lifecycle state
    pub async fn update_status(&self, id: Uuid, status: OrderStatus) -> AppResult<Order> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            UPDATE orders SET status = $2
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Order".to_string()))?;

        let order = Order::try_from(row)?;
        tracing::info!(so_number = %order.so_number, status = %order.status, "Order status updated");
        Ok(order)
    }

    /// Orders as report records for aggregation
    pub async fn records(&self, range: DateRange) -> AppResult<Vec<OrderRecord>> {
        let orders = self
            .list_orders(Some(range.start), Some(range.end), None)
            .await?;

        Ok(orders
            .into_iter()
            .map(|o| OrderRecord {
                order_date: o.order_date,
                customer: o.customer,
                so_number: o.so_number,
                status: o.status,
                pouch_1l_units: o.pouch_1l_units,
                jar_5l_units: o.jar_5l_units,
                tin_15kg_units: o.tin_15kg_units,
                total_mt: o.total_mt,
            })
            .collect())
    }

    /// Count of orders still on the pending book
    pub async fn open_order_count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM orders WHERE status IN ('pending', 'in_transit')",
        )
        .fetch_one(&self.db)
        .await?;
        Ok(count)
    }

    /// Pending orders older than the stale threshold, for alerting
    pub async fn stale_pending_orders(&self, older_than_days: i64) -> AppResult<Vec<Order>> {
        let cutoff = chrono::Utc::now().date_naive() - chrono::Duration::days(older_than_days);
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS}
            FROM orders
            WHERE status = 'pending' AND order_date < $1
            ORDER BY order_date ASC
            "#
        ))
        .bind(cutoff)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }
}
