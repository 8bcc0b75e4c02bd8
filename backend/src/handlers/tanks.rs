//! HTTP handlers for tank dip sheets and the tank table

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{error::AppResult, handlers::refinery::LogListQuery, services::TankService, AppState};
use shared::forms::TanksForm;

/// The fixed tank table, for the admin screen
pub async fn list_tank_specs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = TankService::new(state.db);
    Ok(Json(service.tank_specs()))
}

/// Save one day's dip sheet
pub async fn save_tank_sheet(
    State(state): State<AppState>,
    Json(form): Json<TanksForm>,
) -> AppResult<impl IntoResponse> {
    let service = TankService::new(state.db);
    let sheet = service.save_sheet(form).await?;
    Ok((StatusCode::CREATED, Json(sheet)))
}

/// List dip sheets
pub async fn list_tank_sheets(
    State(state): State<AppState>,
    Query(query): Query<LogListQuery>,
) -> AppResult<impl IntoResponse> {
    let service = TankService::new(state.db);
    let sheets = service.list_sheets(query.from, query.to).await?;
    Ok(Json(sheets))
}

/// The most recent dip sheet with per-oil-type totals
pub async fn latest_tank_sheet(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = TankService::new(state.db);
    let sheet = service.latest_sheet().await?;
    let stock = sheet.as_ref().map(|s| s.stock_record());
    Ok(Json(serde_json::json!({
        "sheet": sheet,
        "stock": stock,
    })))
}
