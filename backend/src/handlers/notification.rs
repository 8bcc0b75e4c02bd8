//! HTTP handlers for the dashboard notification feed

use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::external::WebhookNotifier;
use crate::{error::AppResult, services::NotificationService, AppState};

/// Notification listing filter
#[derive(Debug, Deserialize, Default)]
pub struct NotificationListQuery {
    #[serde(default)]
    pub include_dismissed: bool,
}

/// List notifications for the feed
pub async fn list_notifications(
    State(state): State<AppState>,
    Query(query): Query<NotificationListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = NotificationService::new(state.db);
    let notifications = service.list(query.include_dismissed).await?;
    Ok(Json(notifications))
}

/// Unread count for the bell badge
pub async fn get_unread_count(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = NotificationService::new(state.db);
    let count = service.unread_count().await?;
    Ok(Json(serde_json::json!({ "unread": count })))
}

/// Mark one notification read
pub async fn mark_as_read(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = NotificationService::new(state.db);
    let notification = service.mark_read(notification_id).await?;
    Ok(Json(notification))
}

/// Mark every notification read
pub async fn mark_all_as_read(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = NotificationService::new(state.db);
    let updated = service.mark_all_read().await?;
    Ok(Json(serde_json::json!({ "updated": updated })))
}

/// Dismiss one notification from the feed
pub async fn dismiss_notification(
    State(state): State<AppState>,
    Path(notification_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = NotificationService::new(state.db);
    let notification = service.dismiss(notification_id).await?;
    Ok(Json(notification))
}

/// Run the low tank stock and stale order checks
pub async fn run_alert_checks(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let webhook = WebhookNotifier::from_config(&state.config.webhook);
    let service = NotificationService::new(state.db);

    let mut raised = service
        .check_low_tank_stock(webhook.as_ref(), &state.config.alerts)
        .await?;
    raised.extend(
        service
            .check_stale_orders(webhook.as_ref(), &state.config.alerts)
            .await?,
    );

    Ok(Json(raised))
}
