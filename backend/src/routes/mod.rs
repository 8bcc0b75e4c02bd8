//! Route definitions for the Refinery Operations Platform

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Daily log books
        .nest("/refinery", refinery_routes())
        .nest("/fractionation", fractionation_routes())
        .nest("/chemicals", chemicals_routes())
        .nest("/tanks", tank_routes())
        .nest("/production", production_routes())
        // Order books
        .nest("/orders", order_routes())
        // Reports and dashboard
        .nest("/reports", report_routes())
        // Notification feed
        .nest("/notifications", notification_routes())
}

/// Refinery log book routes
fn refinery_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/logs",
            get(handlers::list_refinery_logs).post(handlers::save_refinery_log),
        )
        .route("/logs/:log_date", get(handlers::get_refinery_log))
}

/// Fractionation log book routes
fn fractionation_routes() -> Router<AppState> {
    Router::new().route(
        "/logs",
        get(handlers::list_fractionation_logs).post(handlers::save_fractionation_log),
    )
}

/// Chemical consumption sheet routes
fn chemicals_routes() -> Router<AppState> {
    Router::new().route(
        "/sheets",
        get(handlers::list_chemical_sheets).post(handlers::save_chemical_sheet),
    )
}

/// Tank dip sheet and tank table routes
fn tank_routes() -> Router<AppState> {
    Router::new()
        .route("/specs", get(handlers::list_tank_specs))
        .route(
            "/sheets",
            get(handlers::list_tank_sheets).post(handlers::save_tank_sheet),
        )
        .route("/sheets/latest", get(handlers::latest_tank_sheet))
}

/// Production tracker routes
fn production_routes() -> Router<AppState> {
    Router::new().route(
        "/entries",
        get(handlers::list_production_entries).post(handlers::save_production_entry),
    )
}

/// Order book routes
fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_orders).post(handlers::create_order))
        .route("/:order_id", get(handlers::get_order))
        .route("/:order_id/status", put(handlers::update_order_status))
}

/// Report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/summary", get(handlers::get_dashboard_summary))
        .route("/:kind", get(handlers::get_report))
        .route("/:kind/series", get(handlers::get_report_series))
        .route("/:kind/export", get(handlers::export_report_csv))
}

/// Notification feed routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_notifications))
        .route("/unread-count", get(handlers::get_unread_count))
        .route("/mark-all-read", post(handlers::mark_all_as_read))
        .route("/:notification_id/read", post(handlers::mark_as_read))
        .route(
            "/:notification_id/dismiss",
            post(handlers::dismiss_notification),
        )
        .route("/checks/run", post(handlers::run_alert_checks))
}
