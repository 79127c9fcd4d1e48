//! Printable roasting and bagging reports
//!
//! Reports only reshape what the engine and the orders already say; the
//! single conversion they perform is grams to kilograms.

use std::collections::HashMap;
use std::fmt::Write;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Blend, Coffee, Order, RoastCalculation};
use crate::planning::{CoffeeIndex, DROP_SIZE_G, UNKNOWN_COFFEE_NAME};
use crate::types::{format_kg, GRAMS_PER_KG};

/// Report generation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("No included orders for session")]
    NoIncludedOrders,
}

// ============================================================================
// Roasting Report
// ============================================================================

/// Render the roasting sheet for a session
pub fn render_roasting_report(
    title: &str,
    session_label: &str,
    rows: &[RoastCalculation],
    coffees: &[Coffee],
) -> String {
    let index = CoffeeIndex::new(coffees);
    let drop_kg = DROP_SIZE_G / GRAMS_PER_KG;
    let mut out = String::new();

    let _ = writeln!(out, "{} - Roasting Report", title);
    let _ = writeln!(out);
    let _ = writeln!(out, "Session: {}", session_label);
    let _ = writeln!(out);

    for row in rows {
        let _ = writeln!(out, "{}", row.coffee_name);
        let _ = writeln!(out, "{}", "-".repeat(row.coffee_name.chars().count()));
        let _ = writeln!(out, "Roasted needed: {} kg", format_kg(row.required_roasted_g));
        let _ = writeln!(out, "Green required: {} kg", format_kg(row.required_green_g));
        let _ = writeln!(out, "Drops: {} x {}kg", row.drops_required, drop_kg);
        let _ = writeln!(out, "Output expected: {} kg", format_kg(row.total_roasted_output));
        let _ = writeln!(out, "Surplus to on-hand: {} kg", format_kg(row.surplus_roasted_g));
        if let Some(cost) = index
            .get(&row.coffee_id)
            .and_then(|c| c.green_cost(row.total_green))
        {
            let _ = writeln!(out, "Green cost: {}", cost);
        }
        let _ = writeln!(out);
    }

    out
}

// ============================================================================
// Bagging Report
// ============================================================================

/// Bags to fill for one SKU
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkuCount {
    pub sku: String,
    pub quantity: u32,
}

/// Roasted grams to bag for one coffee or blend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastedAllocation {
    pub target_id: Option<Uuid>,
    pub label: String,
    pub roasted_g: f64,
}

/// Bagging totals for the included orders of a session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BaggingSummary {
    pub skus: Vec<SkuCount>,
    pub allocations: Vec<RoastedAllocation>,
}

/// Count bags per SKU and roasted grams per target, in first-seen order.
///
/// Items are keyed by their blend id first, then their coffee id; items with
/// neither are grouped under `Unknown`.
pub fn summarize_bagging(
    orders: &[Order],
    coffees: &[Coffee],
    blends: &[Blend],
) -> Result<BaggingSummary, ReportError> {
    let included: Vec<&Order> = orders.iter().filter(|o| o.is_included()).collect();
    if included.is_empty() {
        return Err(ReportError::NoIncludedOrders);
    }

    let coffee_index = CoffeeIndex::new(coffees);
    let blend_names: HashMap<Uuid, &str> =
        blends.iter().map(|b| (b.id, b.name.as_str())).collect();

    let mut summary = BaggingSummary::default();
    let mut sku_positions: HashMap<String, usize> = HashMap::new();
    let mut target_positions: HashMap<Option<Uuid>, usize> = HashMap::new();

    for item in included.iter().flat_map(|o| o.items.iter()) {
        let sku = item.sku();
        match sku_positions.get(&sku) {
            Some(&i) => summary.skus[i].quantity += item.quantity,
            None => {
                sku_positions.insert(sku.clone(), summary.skus.len());
                summary.skus.push(SkuCount {
                    sku,
                    quantity: item.quantity,
                });
            }
        }

        let target_id = item.mapped_blend_id.or(item.mapped_coffee_id);
        match target_positions.get(&target_id) {
            Some(&i) => summary.allocations[i].roasted_g += item.roasted_g(),
            None => {
                let label = match target_id {
                    Some(id) => blend_names
                        .get(&id)
                        .copied()
                        .or_else(|| coffee_index.get(&id).map(|c| c.name.as_str()))
                        .map(str::to_string)
                        .unwrap_or_else(|| id.to_string()),
                    None => UNKNOWN_COFFEE_NAME.to_string(),
                };
                target_positions.insert(target_id, summary.allocations.len());
                summary.allocations.push(RoastedAllocation {
                    target_id,
                    label,
                    roasted_g: item.roasted_g(),
                });
            }
        }
    }

    Ok(summary)
}

/// Render the bagging sheet for a session
pub fn render_bagging_report(session_label: &str, summary: &BaggingSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Bagging Report");
    let _ = writeln!(out, "Session: {}", session_label);
    let _ = writeln!(out);

    let _ = writeln!(out, "SKUs");
    for sku in &summary.skus {
        let _ = writeln!(out, "{} x {}", sku.quantity, sku.sku);
    }
    let _ = writeln!(out);

    let _ = writeln!(out, "Roasted allocation");
    for allocation in &summary.allocations {
        let _ = writeln!(out, "{}: {} kg", allocation.label, format_kg(allocation.roasted_g));
    }

    out
}
