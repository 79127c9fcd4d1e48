//! Common types used across the platform

use serde::{Deserialize, Serialize};

pub const GRAMS_PER_KG: f64 = 1000.0;

/// Convert grams to kilograms
pub fn grams_to_kg(grams: f64) -> f64 {
    grams / GRAMS_PER_KG
}

/// Kilograms with two decimals, e.g. `1.18`
pub fn format_kg(grams: f64) -> String {
    format!("{:.2}", grams_to_kg(grams))
}

/// A roast session as seen by reports
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRef {
    pub id: Option<uuid::Uuid>,
    pub session_date: chrono::NaiveDate,
}

impl SessionRef {
    /// ISO date label, e.g. `2024-05-06`
    pub fn label(&self) -> String {
        self.session_date.format("%Y-%m-%d").to_string()
    }
}
