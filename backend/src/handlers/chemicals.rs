//! HTTP handlers for the chemical consumption sheet

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult, handlers::refinery::LogListQuery, services::ChemicalsService, AppState,
};
use shared::forms::ChemicalsForm;

/// Save one day's chemical consumption sheet
pub async fn save_chemical_sheet(
    State(state): State<AppState>,
    Json(form): Json<ChemicalsForm>,
) -> AppResult<impl IntoResponse> {
    let service = ChemicalsService::new(state.db);
    let sheet = service.save_sheet(form).await?;
    Ok((StatusCode::CREATED, Json(sheet)))
}

/// List chemical sheets
pub async fn list_chemical_sheets(
    State(state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = ChemicalsService::new(state.db);
    let sheets = service.list_sheets(query.from, query.to).await?;
    Ok(Json(sheets))
}
