//! Result formatter: attaches catalogue details to requirement rows

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::{Coffee, RoastCalculation, RoastRequirement};

/// Name reported for a coffee id missing from the catalogue
pub const UNKNOWN_COFFEE_NAME: &str = "Unknown";

/// Coffee catalogue keyed by id
#[derive(Debug, Clone, Default)]
pub struct CoffeeIndex<'a> {
    by_id: HashMap<Uuid, &'a Coffee>,
}

impl<'a> CoffeeIndex<'a> {
    pub fn new(coffees: &'a [Coffee]) -> Self {
        Self {
            by_id: coffees.iter().map(|c| (c.id, c)).collect(),
        }
    }

    pub fn get(&self, coffee_id: &Uuid) -> Option<&'a Coffee> {
        self.by_id.get(coffee_id).copied()
    }

    /// Catalogue roast loss percentage, 0 for unknown coffees
    pub fn roast_loss_percentage(&self, coffee_id: &Uuid) -> f64 {
        self.get(coffee_id)
            .map(|c| c.roast_loss_percentage)
            .unwrap_or(0.0)
    }

    pub fn roast_loss_fraction(&self, coffee_id: &Uuid) -> f64 {
        self.roast_loss_percentage(coffee_id) / 100.0
    }

    pub fn name(&self, coffee_id: &Uuid) -> &'a str {
        self.get(coffee_id)
            .map(|c| c.name.as_str())
            .unwrap_or(UNKNOWN_COFFEE_NAME)
    }
}

/// Shape one requirement into the reported row
pub fn format_calculation(
    requirement: &RoastRequirement,
    coffees: &CoffeeIndex<'_>,
) -> RoastCalculation {
    RoastCalculation {
        coffee_id: requirement.coffee_id,
        coffee_name: coffees.name(&requirement.coffee_id).to_string(),
        roast_loss_percentage: coffees.roast_loss_percentage(&requirement.coffee_id),
        required_roasted_g: requirement.required_roasted_g,
        required_green_g: requirement.required_green_g,
        drops_required: requirement.drops_required,
        total_green: requirement.total_green,
        total_roasted_output: requirement.total_roasted_output,
        surplus_roasted_g: requirement.surplus_roasted_g,
    }
}

/// Re-label stored requirement rows against the current catalogue
pub fn format_calculations(
    requirements: &[RoastRequirement],
    coffees: &[Coffee],
) -> Vec<RoastCalculation> {
    let index = CoffeeIndex::new(coffees);
    requirements
        .iter()
        .map(|r| format_calculation(r, &index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn requirement(coffee_id: Uuid) -> RoastRequirement {
        RoastRequirement {
            coffee_id,
            required_roasted_g: 1000.0,
            required_green_g: 1000.0 / 0.85,
            drops_required: 1,
            total_green: 5000.0,
            total_roasted_output: 4250.0,
            surplus_roasted_g: 3250.0,
        }
    }

    #[test]
    fn test_format_attaches_catalogue_details() {
        let coffee = Coffee::new("Kenya Nyeri", 15.0);
        let coffees = vec![coffee.clone()];
        let index = CoffeeIndex::new(&coffees);

        let row = format_calculation(&requirement(coffee.id), &index);
        assert_eq!(row.coffee_name, "Kenya Nyeri");
        assert_eq!(row.roast_loss_percentage, 15.0);
        assert_eq!(row.drops_required, 1);
        assert_eq!(row.surplus_roasted_g, 3250.0);
    }

    #[test]
    fn test_format_unknown_coffee_uses_fallback() {
        let index = CoffeeIndex::default();
        let row = format_calculation(&requirement(Uuid::new_v4()), &index);
        assert_eq!(row.coffee_name, UNKNOWN_COFFEE_NAME);
        assert_eq!(row.roast_loss_percentage, 0.0);
    }

    #[test]
    fn test_format_calculations_preserves_order() {
        let a = Coffee::new("A", 14.0);
        let b = Coffee::new("B", 16.0);
        let coffees = vec![a.clone(), b.clone()];

        let rows = format_calculations(&[requirement(b.id), requirement(a.id)], &coffees);
        assert_eq!(rows[0].coffee_name, "B");
        assert_eq!(rows[1].coffee_name, "A");
    }
}
