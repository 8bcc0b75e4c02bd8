//! HTTP handlers for the fractionation log book

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult, handlers::refinery::LogListQuery, services::FractionationService, AppState,
};
use shared::forms::FractionationForm;

/// Save one day's fractionation log
pub async fn save_fractionation_log(
    State(state): State<AppState>,
    Json(form): Json<FractionationForm>,
) -> AppResult<impl IntoResponse> {
    let service = FractionationService::new(state.db);
    let log = service.save_log(form).await?;
    Ok((StatusCode::CREATED, Json(log)))
}

/// List fractionation logs
pub async fn list_fractionation_logs(
    State(state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = FractionationService::new(state.db);
    let logs = service.list_logs(query.from, query.to).await?;
    Ok(Json(logs))
}
