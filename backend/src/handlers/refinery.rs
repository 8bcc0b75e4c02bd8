//! HTTP handlers for the refinery log book

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::AppResult, services::RefineryService, AppState};
use shared::forms::RefineryForm;

/// Date window for log listings
#[derive(Debug, Deserialize)]
pub struct LogListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// Save one day's refinery log
pub async fn save_refinery_log(
    State(state): State<AppState>,
    Json(form): Json<RefineryForm>,
) -> AppResult<impl IntoResponse> {
    let service = RefineryService::new(state.db);
    let log = service.save_log(form).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// List refinery logs
pub async fn list_refinery_logs(
    State(state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = RefineryService::new(state.db);
    let logs = service.list_logs(query.from, query.to).await?;
    Ok(Json(logs))
}

/// Get the refinery log for one day
pub async fn get_refinery_log(
    State(state): State<AppState>,
    Path(log_date): Path<NaiveDate>,
) -> AppResult<impl IntoResponse> {
    let service = RefineryService::new(state.db);
    let log = service.get_log(log_date).await?;
    Ok(Json(log))
}
