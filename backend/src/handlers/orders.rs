//! Order import handlers

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::orders::{ImportSummary, OrderImportService, ShopifyImportInput};
use crate::AppState;

/// Import orders from a Shopify payload
pub async fn import_shopify_orders(
    State(state): State<AppState>,
    Json(input): Json<ShopifyImportInput>,
) -> AppResult<Json<ImportSummary>> {
    let service = OrderImportService::new(state.config.import.clone());
    let summary = service.import_shopify(input)?;
    Ok(Json(summary))
}
