//! Legacy single-endpoint wire contract
//!
//! The old dashboard talked to one URL: every form was POSTed to `/`
//! with a `type` tag mixed into the body, and listings were fetched
//! with `GET /?endpoint=<name>`. Outcomes ride in the body as a
//! `{"status": ...}` envelope, always over HTTP 200, so the old client
//! keeps working unchanged.

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use serde_json::json;

use crate::error::AppError;
use crate::services::{ChemicalsService, IntakeService, NotificationService, TankService};
use crate::AppState;
use shared::forms::{LegacyStatus, Submission};

/// Query string for the legacy GET dispatcher
#[derive(Debug, Deserialize, Default)]
pub struct LegacyQuery {
    pub endpoint: Option<String>,
}

fn legacy_status_for(error: &AppError) -> u16 {
    match error {
        AppError::Validation { .. } | AppError::ValidationError(_) => 400,
        AppError::NotFound(_) => 404,
        AppError::DuplicateEntry(_) => 409,
        _ => 500,
    }
}

/// Accept a type-tagged form submission
pub async fn legacy_submit(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> impl IntoResponse {
    let submission: Submission = match serde_json::from_value(body) {
        Ok(submission) => submission,
        Err(e) => {
            return Json(json!(LegacyStatus::error(
                400,
                format!("Unrecognized submission: {}", e)
            )));
        }
    };

    match IntakeService::new(state.db).accept(submission).await {
        Ok(receipt) => Json(json!({
            "status": 200,
            "id": receipt.id,
            "type": receipt.kind,
            "log_date": receipt.log_date,
        })),
        Err(e) => {
            tracing::warn!("Legacy submission rejected: {}", e);
            Json(json!(LegacyStatus::error(
                legacy_status_for(&e),
                e.to_string()
            )))
        }
    }
}

/// Dispatch a legacy `?endpoint=` listing request
pub async fn legacy_dispatch(
    State(state): State<AppState>,
    Query(query): Query<LegacyQuery>,
) -> impl IntoResponse {
    let endpoint = match query.endpoint.as_deref() {
        Some(endpoint) => endpoint,
        // Bare GET / is the old health probe
        None => {
            return Json(json!({
                "status": 200,
                "service": "Refinery Operations Platform API",
                "version": env!("CARGO_PKG_VERSION"),
            }));
        }
    };

    let result = match endpoint {
        "notifications" => NotificationService::new(state.db)
            .list(false)
            .await
            .map(|data| json!({ "status": 200, "data": data })),
        "stocks" => TankService::new(state.db)
            .list_sheets(None, None)
            .await
            .map(|data| json!({ "status": 200, "data": data })),
        "chemicals" => ChemicalsService::new(state.db)
            .list_sheets(None, None)
            .await
            .map(|data| json!({ "status": 200, "data": data })),
        other => {
            return Json(json!(LegacyStatus::error(
                404,
                format!("Unknown endpoint '{}'", other)
            )));
        }
    };

    match result {
        Ok(body) => Json(body),
        Err(e) => {
            tracing::error!("Legacy listing failed: {}", e);
            Json(json!(LegacyStatus::error(
                legacy_status_for(&e),
                e.to_string()
            )))
        }
    }
}
