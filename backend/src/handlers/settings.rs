//! Catalogue settings handlers

use axum::Json;

use crate::services::settings::{CatalogueInput, CatalogueReport, SettingsService};

/// Check coffees, blends and variant mappings for consistency
pub async fn validate_settings(Json(input): Json<CatalogueInput>) -> Json<CatalogueReport> {
    Json(SettingsService::new().validate(&input))
}
