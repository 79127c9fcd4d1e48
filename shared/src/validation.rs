//! Validation utilities for the Roast Mate catalogue and orders
//!
//! The allocation engine never validates its inputs; these checks belong to
//! the settings screens and run before anything is saved.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::models::{Blend, Coffee, VariantMapping};

/// Tolerance when comparing summed float percentages against 100
const PERCENT_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Catalogue Validations
// ============================================================================

/// Validate blend component percentages sum to 100
pub fn validate_blend_proportions(percentages: &[f64]) -> Result<(), &'static str> {
    if percentages.is_empty() {
        return Err("Blend must have at least one component");
    }
    let total: f64 = percentages.iter().sum();
    if (total - 100.0).abs() > PERCENT_TOLERANCE {
        return Err("Blend proportions must sum to 100%");
    }
    for p in percentages {
        if *p < 0.0 {
            return Err("Blend proportions cannot be negative");
        }
    }
    Ok(())
}

/// Validate roast loss is a percentage
pub fn validate_roast_loss(percentage: f64) -> Result<(), &'static str> {
    if !(0.0..=100.0).contains(&percentage) {
        return Err("Roast loss must be between 0 and 100%");
    }
    Ok(())
}

/// Check if roast loss is in the usual range for a finished roast (11-20%)
pub fn is_typical_roast_loss(percentage: f64) -> bool {
    (11.0..=20.0).contains(&percentage)
}

/// Validate a variant mapping points at the target its flag selects
pub fn validate_variant_mapping(mapping: &VariantMapping) -> Result<(), &'static str> {
    match (mapping.is_blend, mapping.coffee_id, mapping.blend_id) {
        (true, _, None) => Err("Blend mapping requires a blend"),
        (false, None, _) => Err("Coffee mapping requires a coffee"),
        (_, Some(_), Some(_)) => Err("Mapping must point at either a coffee or a blend, not both"),
        _ => Ok(()),
    }
}

// ============================================================================
// Order Validations
// ============================================================================

/// Validate a packaged order line has a positive size and quantity
pub fn validate_order_line_size(size_g: u32, quantity: u32) -> Result<(), &'static str> {
    if size_g == 0 {
        return Err("Package size must be greater than 0g");
    }
    if quantity == 0 {
        return Err("Quantity must be at least 1");
    }
    Ok(())
}

// ============================================================================
// Whole-Catalogue Check
// ============================================================================

/// A problem found while checking the catalogue
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogueIssue {
    pub entity: String,
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl CatalogueIssue {
    fn new(
        entity: &str,
        id: impl ToString,
        field: Option<&str>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            entity: entity.to_string(),
            id: id.to_string(),
            field: field.map(str::to_string),
            message: message.into(),
        }
    }
}

fn push_field_errors(
    issues: &mut Vec<CatalogueIssue>,
    entity: &str,
    id: &str,
    prefix: &str,
    errors: &ValidationErrors,
) {
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| error.code.to_string());
            let field = format!("{}{}", prefix, field);
            issues.push(CatalogueIssue::new(entity, id, Some(&field), message));
        }
    }
}

/// Check coffees, blends and variant mappings together.
///
/// Returns every issue found; an empty list means the catalogue is usable.
pub fn validate_catalogue(
    coffees: &[Coffee],
    blends: &[Blend],
    mappings: &[VariantMapping],
) -> Vec<CatalogueIssue> {
    let mut issues = Vec::new();
    let coffee_ids: HashSet<_> = coffees.iter().map(|c| c.id).collect();
    let blend_ids: HashSet<_> = blends.iter().map(|b| b.id).collect();

    for coffee in coffees {
        let id = coffee.id.to_string();
        if let Err(errors) = coffee.validate() {
            push_field_errors(&mut issues, "coffee", &id, "", &errors);
        }
        if let Err(message) = validate_roast_loss(coffee.roast_loss_percentage) {
            issues.push(CatalogueIssue::new(
                "coffee",
                &id,
                Some("roast_loss_percentage"),
                message,
            ));
        }
    }

    for blend in blends {
        let id = blend.id.to_string();
        if let Err(errors) = blend.validate() {
            push_field_errors(&mut issues, "blend", &id, "", &errors);
        }
        for (i, component) in blend.components.iter().enumerate() {
            if let Err(errors) = component.validate() {
                let prefix = format!("components[{}].", i);
                push_field_errors(&mut issues, "blend", &id, &prefix, &errors);
            }
            if !coffee_ids.contains(&component.coffee_id) {
                let field = format!("components[{}].coffee_id", i);
                issues.push(CatalogueIssue::new(
                    "blend",
                    &id,
                    Some(&field),
                    format!("Unknown coffee {}", component.coffee_id),
                ));
            }
        }
        let percentages: Vec<f64> = blend.components.iter().map(|c| c.percentage).collect();
        if let Err(message) = validate_blend_proportions(&percentages) {
            let message = format!("{} (components total {}%)", message, blend.total_percentage());
            issues.push(CatalogueIssue::new("blend", &id, Some("components"), message));
        }
    }

    for mapping in mappings {
        let id = mapping.variant_id.as_str();
        if let Err(errors) = mapping.validate() {
            push_field_errors(&mut issues, "mapping", id, "", &errors);
        }
        if let Err(message) = validate_variant_mapping(mapping) {
            issues.push(CatalogueIssue::new("mapping", id, None, message));
            continue;
        }
        let dangling = match (mapping.is_blend, mapping.coffee_id, mapping.blend_id) {
            (true, _, Some(blend_id)) => (!blend_ids.contains(&blend_id))
                .then(|| ("blend_id", format!("Unknown blend {}", blend_id))),
            (false, Some(coffee_id), _) => (!coffee_ids.contains(&coffee_id))
                .then(|| ("coffee_id", format!("Unknown coffee {}", coffee_id))),
            _ => None,
        };
        if let Some((field, message)) = dangling {
            issues.push(CatalogueIssue::new("mapping", id, Some(field), message));
        }
    }

    issues
}
