//! Roast planning inputs and outputs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Blend, Coffee, OnHandLookup, OrderLine};

/// Everything the allocation engine needs for one planning run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoastInput {
    pub coffees: Vec<Coffee>,
    pub blends: Vec<Blend>,
    pub orders: Vec<OrderLine>,
    #[serde(default)]
    pub on_hand: OnHandLookup,
}

/// Roasting requirement for one coffee, before catalogue details are attached
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastRequirement {
    pub coffee_id: Uuid,
    pub required_roasted_g: f64,
    pub required_green_g: f64,
    pub drops_required: u64,
    pub total_green: f64,
    pub total_roasted_output: f64,
    pub surplus_roasted_g: f64,
}

/// Reported roasting row for one coffee
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoastCalculation {
    pub coffee_id: Uuid,
    pub coffee_name: String,
    pub roast_loss_percentage: f64,
    pub required_roasted_g: f64,
    pub required_green_g: f64,
    pub drops_required: u64,
    pub total_green: f64,
    pub total_roasted_output: f64,
    pub surplus_roasted_g: f64,
}

impl From<&RoastCalculation> for RoastRequirement {
    fn from(row: &RoastCalculation) -> Self {
        Self {
            coffee_id: row.coffee_id,
            required_roasted_g: row.required_roasted_g,
            required_green_g: row.required_green_g,
            drops_required: row.drops_required,
            total_green: row.total_green,
            total_roasted_output: row.total_roasted_output,
            surplus_roasted_g: row.surplus_roasted_g,
        }
    }
}

/// Result of a planning run: rows plus the ledger to carry into the next session
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoastPlan {
    pub results: Vec<RoastCalculation>,
    pub on_hand_after: OnHandLookup,
}

impl RoastPlan {
    pub fn total_drops(&self) -> u64 {
        self.results.iter().map(|r| r.drops_required).sum()
    }

    pub fn total_green(&self) -> f64 {
        self.results.iter().map(|r| r.total_green).sum()
    }
}
