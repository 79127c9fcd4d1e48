//! Single-origin coffee catalogue models

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A coffee the roastery buys green and roasts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Coffee {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Coffee name is required"))]
    pub name: String,
    /// Share of green mass lost to roasting, 0-100
    pub roast_loss_percentage: f64,
    pub cost_per_kg: Option<Decimal>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Coffee {
    pub fn new(name: impl Into<String>, roast_loss_percentage: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            roast_loss_percentage,
            cost_per_kg: None,
            active: true,
        }
    }

    /// Roast loss as a fraction of green mass
    pub fn roast_loss_fraction(&self) -> f64 {
        self.roast_loss_percentage / 100.0
    }

    /// Estimated cost of the given amount of green coffee
    pub fn green_cost(&self, green_g: f64) -> Option<Decimal> {
        let per_kg = self.cost_per_kg?;
        let kg = Decimal::try_from(green_g / 1000.0).ok()?;
        Some((per_kg * kg).round_dp(2))
    }
}
