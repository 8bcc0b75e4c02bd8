//! HTTP handlers for the customer order books

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    services::OrderService,
    AppState,
};
use shared::models::{OrderInput, OrderStatus};

/// Order listing filter
#[derive(Debug, Deserialize)]
pub struct OrderListQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<String>,
}

/// Status change body
#[derive(Debug, Deserialize)]
pub struct StatusUpdate {
    pub status: String,
}

fn parse_status(raw: &str) -> AppResult<OrderStatus> {
    OrderStatus::parse(raw).ok_or_else(|| AppError::Validation {
        field: "status".to_string(),
        message: format!("Unknown order status '{}'", raw),
    })
}

/// Record a new customer order
pub async fn create_order(
    State(state): State<AppState>,
    Json(input): Json<OrderInput>,
) -> AppResult<impl IntoResponse> {
    let service = OrderService::new(state.db);
    let order = service.create_order(input).await?;
    Ok((StatusCode::CREATED, Json(order)))
}

/// List orders
pub async fn list_orders(
    State(state): State<AppState>,
    Query(query): Query<OrderListQuery>,
) -> AppResult<impl IntoResponse> {
    let status = query.status.as_deref().map(parse_status).transpose()?;
    let service = OrderService::new(state.db);
    let orders = service.list_orders(query.from, query.to, status).await?;
    Ok(Json(orders))
}

/// Get one order
pub async fn get_order(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let service = OrderService::new(state.db);
    let order = service.get_order(order_id).await?;
    Ok(Json(order))
}

/// Move an order to a new lifecycle state
pub async fn update_order_status(
    State(state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> AppResult<impl IntoResponse> {
    let status = parse_status(&update.status)?;
    let service = OrderService::new(state.db);
    let order = service.update_status(order_id, status).await?;
    Ok(Json(order))
}
