//! Catalogue settings checks

use serde::{Deserialize, Serialize};
use shared::validation::{is_typical_roast_loss, validate_catalogue, CatalogueIssue};

use crate::models::{Blend, Coffee, VariantMapping};

#[derive(Debug, Deserialize)]
pub struct CatalogueInput {
    #[serde(default)]
    pub coffees: Vec<Coffee>,
    #[serde(default)]
    pub blends: Vec<Blend>,
    #[serde(default)]
    pub mappings: Vec<VariantMapping>,
}

#[derive(Debug, Serialize)]
pub struct CatalogueReport {
    pub valid: bool,
    pub issues: Vec<CatalogueIssue>,
}

#[derive(Clone, Default)]
pub struct SettingsService;

impl SettingsService {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, input: &CatalogueInput) -> CatalogueReport {
        for coffee in &input.coffees {
            if !is_typical_roast_loss(coffee.roast_loss_percentage) {
                tracing::warn!(
                    "Coffee {} has an unusual roast loss of {}%",
                    coffee.name,
                    coffee.roast_loss_percentage
                );
            }
        }

        let issues = validate_catalogue(&input.coffees, &input.blends, &input.mappings);
        CatalogueReport {
            valid: issues.is_empty(),
            issues,
        }
    }
}
