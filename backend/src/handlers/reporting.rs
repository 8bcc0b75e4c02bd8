//! Reporting handlers for summaries, chart series and CSV export

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::services::reporting::{ReportKind, ReportQuery, ReportingService};
use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// Series query: a report query plus the column to chart
#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub start_date: chrono::NaiveDate,
    pub end_date: chrono::NaiveDate,
    #[serde(default)]
    pub group_by: shared::reports::GroupBy,
    pub search: Option<String>,
    pub field: String,
}

impl SeriesQuery {
    fn report(&self) -> ReportQuery {
        ReportQuery {
            start_date: self.start_date,
            end_date: self.end_date,
            group_by: self.group_by,
            search: self.search.clone(),
        }
    }
}

fn parse_kind(raw: &str) -> AppResult<ReportKind> {
    match raw {
        "stocks" => Ok(ReportKind::Stocks),
        "chemicals" => Ok(ReportKind::Chemicals),
        "orders" => Ok(ReportKind::Orders),
        _ => Err(AppError::Validation {
            field: "kind".to_string(),
            message: format!("Unknown report kind '{}'", raw),
        }),
    }
}

/// Build the report table for one log book
pub async fn get_report(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let service = ReportingService::new(state.db);
    let table = service.report(kind, &query).await?;
    Ok(Json(table))
}

/// Chart series for one numeric column of a report
pub async fn get_report_series(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<SeriesQuery>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let service = ReportingService::new(state.db);
    let series = service.series(kind, &query.report(), &query.field).await?;
    Ok(Json(series))
}

/// Download a report table as CSV
pub async fn export_report_csv(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Query(query): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let kind = parse_kind(&kind)?;
    let service = ReportingService::new(state.db);
    let table = service.report(kind, &query).await?;
    let csv = ReportingService::export_to_csv(&table, ReportingService::fields(kind))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"report.csv\"",
            ),
        ],
        csv,
    ))
}

/// Summary cards for the dashboard landing page
pub async fn get_dashboard_summary(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.db);
    let today = chrono::Utc::now().date_naive();
    let summary = service.dashboard_summary(today).await?;
    Ok(Json(summary))
}
