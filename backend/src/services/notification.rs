//! Dashboard notification service
//!
//! Feeds the bell icon on the dashboard: low tank stock alerts, stale
//! pending orders and plain informational entries. Alerts are also
//! pushed to the configured webhook when one is set up.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::config::AlertConfig;
use crate::error::{AppError, AppResult};
use crate::external::WebhookNotifier;
use crate::services::orders::OrderService;
use crate::services::tanks::TankService;
use shared::models::{find_tank, NotificationLevel, TankReading};

/// Service for the dashboard notification feed
#[derive(Clone)]
pub struct NotificationService {
    db: PgPool,
}

/// One stored notification
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct StoredNotification {
    pub id: Uuid,
    pub level: String,
    pub title: String,
    pub message: String,
    pub entity_ref: Option<String>,
    pub read: bool,
    pub dismissed: bool,
    pub created_at: DateTime<Utc>,
}

const NOTIFICATION_COLUMNS: &str =
    "id, level, title, message, entity_ref, read, dismissed, created_at";

/// Check one tank reading against the low-stock threshold
///
/// Returns the fill percentage when it is at or below the threshold.
pub fn low_stock_fill(reading: &TankReading, threshold_percent: u32) -> Option<Decimal> {
    // Tanks the operator never dipped are skipped, not alerted
    if reading.is_empty() {
        return None;
    }
    let fill = reading.fill_percent();
    if fill <= Decimal::from(threshold_percent) {
        Some(fill)
    } else {
        None
    }
}

impl NotificationService {
    /// Create a new NotificationService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Store a notification and push it to the webhook if configured
    pub async fn notify(
        &self,
        webhook: Option<&WebhookNotifier>,
        level: NotificationLevel,
        title: &str,
        message: &str,
        entity_ref: Option<&str>,
    ) -> AppResult<StoredNotification> {
        let level_str = match level {
            NotificationLevel::Info => "info",
            NotificationLevel::Warning => "warning",
            NotificationLevel::Alert => "alert",
        };

        let notification = sqlx::query_as::<_, StoredNotification>(&format!(
            r#"
            INSERT INTO notifications (level, title, message, entity_ref)
            VALUES ($1, $2, $3, $4)
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(level_str)
        .bind(title)
        .bind(message)
        .bind(entity_ref)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(level = level_str, title = %title, "Notification created");

        if let Some(webhook) = webhook {
            // Webhook failures never fail the caller; the notification
            // is already stored for the dashboard feed
            if let Err(e) = webhook.push(&notification).await {
                tracing::warn!("Webhook push failed: {}", e);
            }
        }

        Ok(notification)
    }

    /// List notifications, newest first; dismissed entries are hidden
    /// unless asked for
    pub async fn list(&self, include_dismissed: bool) -> AppResult<Vec<StoredNotification>> {
        let notifications = sqlx::query_as::<_, StoredNotification>(&format!(
            r#"
            SELECT {NOTIFICATION_COLUMNS}
            FROM notifications
            WHERE ($1 OR NOT dismissed)
            ORDER BY created_at DESC
            LIMIT 200
            "#
        ))
        .bind(include_dismissed)
        .fetch_all(&self.db)
        .await?;

        Ok(notifications)
    }

    /// Count of unread, undismissed notifications for the bell badge
    pub async fn unread_count(&self) -> AppResult<i64> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE NOT read AND NOT dismissed",
        )
        .fetch_one(&self.db)
        .await?;
        Ok(count)
    }

    /// Mark one notification read
    pub async fn mark_read(&self, id: Uuid) -> AppResult<StoredNotification> {
        let notification = sqlx::query_as::<_, StoredNotification>(&format!(
            r#"
            UPDATE notifications SET read = true
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification".to_string()))?;

        Ok(notification)
    }

    /// Mark every notification read
    pub async fn mark_all_read(&self) -> AppResult<u64> {
        let result = sqlx::query("UPDATE notifications SET read = true WHERE NOT read")
            .execute(&self.db)
            .await?;
        Ok(result.rows_affected())
    }

    /// Dismiss one notification from the feed
    pub async fn dismiss(&self, id: Uuid) -> AppResult<StoredNotification> {
        let notification = sqlx::query_as::<_, StoredNotification>(&format!(
            r#"
            UPDATE notifications SET dismissed = true, read = true
            WHERE id = $1
            RETURNING {NOTIFICATION_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Notification".to_string()))?;

        Ok(notification)
    }

    /// Raise alerts for tanks running low on the latest dip sheet
    pub async fn check_low_tank_stock(
        &self,
        webhook: Option<&WebhookNotifier>,
        alerts: &AlertConfig,
    ) -> AppResult<Vec<StoredNotification>> {
        let tanks = TankService::new(self.db.clone());
        let sheet = match tanks.latest_sheet().await? {
            Some(sheet) => sheet,
            None => return Ok(Vec::new()),
        };

        let mut raised = Vec::new();
        for reading in &sheet.readings {
            let fill = match low_stock_fill(reading, alerts.low_stock_percent) {
                Some(fill) => fill,
                None => continue,
            };
            let label = find_tank(&reading.tank_id)
                .map(|t| t.label)
                .unwrap_or(reading.tank_id.as_str());
            let message = format!(
                "{} is at {}% of capacity ({} MT) on the {} dip sheet",
                label,
                fill.round_dp(1),
                reading.quantity_mt.round_dp(2),
                sheet.log_date
            );
            let notification = self
                .notify(
                    webhook,
                    NotificationLevel::Alert,
                    "Low tank stock",
                    &message,
                    Some(&reading.tank_id),
                )
                .await?;
            raised.push(notification);
        }

        Ok(raised)
    }

    /// Raise warnings for pending orders past the stale threshold
    pub async fn check_stale_orders(
        &self,
        webhook: Option<&WebhookNotifier>,
        alerts: &AlertConfig,
    ) -> AppResult<Vec<StoredNotification>> {
        let orders = OrderService::new(self.db.clone());
        let stale = orders.stale_pending_orders(alerts.stale_order_days).await?;

        let mut raised = Vec::new();
        for order in stale {
            let message = format!(
                "Order {} for {} has been pending since {}",
                order.so_number, order.customer, order.order_date
            );
            let notification = self
                .notify(
                    webhook,
                    NotificationLevel::Warning,
                    "Stale pending order",
                    &message,
                    Some(&order.so_number),
                )
                .await?;
            raised.push(notification);
        }

        Ok(raised)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn reading(tank_id: &str, dip_cm: &str) -> TankReading {
        TankReading {
            tank_id: tank_id.to_string(),
            dip_cm: dip_cm.to_string(),
            ..TankReading::default()
        }
        .recompute()
    }

    #[test]
    fn test_low_stock_fires_at_the_threshold() {
        // T01 at 140 cm holds 99.4 of 994 MT, exactly 10%
        let fill = low_stock_fill(&reading("T01", "140"), 10);
        assert_eq!(fill, Some(dec("10")));
    }

    #[test]
    fn test_stock_above_threshold_is_quiet() {
        assert_eq!(low_stock_fill(&reading("T01", "141"), 10), None);
    }

    #[test]
    fn test_undipped_tank_is_skipped() {
        // No dip entry means no reading, not an empty tank
        assert_eq!(low_stock_fill(&reading("T01", ""), 10), None);
    }
}
