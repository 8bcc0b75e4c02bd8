//! HTTP handlers for the production tracker

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{error::AppResult, services::ProductionService, AppState};
use shared::forms::ProductionTrackerForm;

/// Production listing filter
#[derive(Debug, Deserialize)]
pub struct ProductionListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub product: Option<String>,
}

/// Save one day's production entry
pub async fn save_production_entry(
    State(state): State<AppState>,
    Json(form): Json<ProductionTrackerForm>,
) -> AppResult<impl IntoResponse> {
    let service = ProductionService::new(state.db);
    let entry = service.save_entry(form).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// List production entries
pub async fn list_production_entries(
    State(state): State<AppState>,
    Query(query): Query<ProductionListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ProductionService::new(state.db);
    let entries = service
        .list_entries(query.from, query.to, query.product.as_deref())
        .await?;
    Ok(Json(entries))
}
