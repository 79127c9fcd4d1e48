//! On-hand roasted stock models

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored on-hand stock record; carries a coffee id or a blend id
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnHandStock {
    pub coffee_id: Option<Uuid>,
    pub blend_id: Option<Uuid>,
    pub on_hand_roasted_g: f64,
}

impl OnHandStock {
    pub fn coffee(coffee_id: Uuid, on_hand_roasted_g: f64) -> Self {
        Self {
            coffee_id: Some(coffee_id),
            blend_id: None,
            on_hand_roasted_g,
        }
    }

    pub fn blend(blend_id: Uuid, on_hand_roasted_g: f64) -> Self {
        Self {
            coffee_id: None,
            blend_id: Some(blend_id),
            on_hand_roasted_g,
        }
    }
}

/// Roasted grams on hand, per coffee and per finished blend
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OnHandLookup {
    #[serde(default)]
    pub coffees: BTreeMap<Uuid, f64>,
    #[serde(default)]
    pub blends: BTreeMap<Uuid, f64>,
}

impl OnHandLookup {
    pub fn coffee(&self, coffee_id: &Uuid) -> f64 {
        self.coffees.get(coffee_id).copied().unwrap_or(0.0)
    }

    pub fn blend(&self, blend_id: &Uuid) -> f64 {
        self.blends.get(blend_id).copied().unwrap_or(0.0)
    }

    /// Flatten back into stock records: coffees first, then blends
    pub fn to_stock_records(&self) -> Vec<OnHandStock> {
        self.coffees
            .iter()
            .map(|(id, grams)| OnHandStock::coffee(*id, *grams))
            .chain(
                self.blends
                    .iter()
                    .map(|(id, grams)| OnHandStock::blend(*id, *grams)),
            )
            .collect()
    }
}
