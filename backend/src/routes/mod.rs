//! Route definitions for Roast Mate

use axum::{routing::{get, post}, Router};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/sessions", post(handlers::start_session))
        .route("/plans/calculate", post(handlers::calculate_plan))
        .nest("/orders", order_routes())
        .nest("/reports", report_routes())
        .nest("/settings", settings_routes())
}

/// Order import routes
fn order_routes() -> Router<AppState> {
    Router::new().route("/import/shopify", post(handlers::import_shopify_orders))
}

/// Session report routes
fn report_routes() -> Router<AppState> {
    Router::new()
        .route("/roasting", post(handlers::roasting_report))
        .route("/roasting/csv", post(handlers::roasting_report_csv))
        .route("/bagging", post(handlers::bagging_report))
}

fn settings_routes() -> Router<AppState> {
    Router::new().route("/validate", post(handlers::validate_settings))
}
