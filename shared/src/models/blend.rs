//! Blend catalogue models

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A finished product mixed from several coffees in fixed shares
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct Blend {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Blend name is required"))]
    pub name: String,
    #[validate]
    pub components: Vec<BlendComponent>,
}

/// One coffee's share of a blend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct BlendComponent {
    pub coffee_id: Uuid,
    #[validate(range(
        min = 0.0,
        max = 100.0,
        message = "Component percentage must be between 0 and 100"
    ))]
    pub percentage: f64,
}

impl Blend {
    pub fn new(name: impl Into<String>, components: Vec<BlendComponent>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            components,
        }
    }

    /// Sum of the stated component percentages
    pub fn total_percentage(&self) -> f64 {
        self.components.iter().map(|c| c.percentage).sum()
    }
}

impl BlendComponent {
    pub fn new(coffee_id: Uuid, percentage: f64) -> Self {
        Self {
            coffee_id,
            percentage,
        }
    }
}
