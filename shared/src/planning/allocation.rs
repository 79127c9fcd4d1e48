//! Allocation engine: order demand to per-coffee roast requirements

use std::collections::{BTreeMap, HashMap};

use rust_decimal::prelude::ToPrimitive;
use uuid::Uuid;

use super::{format_calculation, CoffeeIndex, DROP_SIZE_G};
use crate::models::{Blend, OnHandLookup, OrderTarget, RoastInput, RoastPlan, RoastRequirement};

/// Running totals per id, iterated in first-insertion order
#[derive(Debug, Default)]
struct Tally {
    order: Vec<Uuid>,
    totals: HashMap<Uuid, f64>,
}

impl Tally {
    fn add(&mut self, id: Uuid, grams: f64) {
        match self.totals.get_mut(&id) {
            Some(total) => *total += grams,
            None => {
                self.order.push(id);
                self.totals.insert(id, grams);
            }
        }
    }

    fn get(&self, id: &Uuid) -> f64 {
        self.totals.get(id).copied().unwrap_or(0.0)
    }

    fn iter(&self) -> impl Iterator<Item = (Uuid, f64)> + '_ {
        self.order.iter().map(|id| (*id, self.get(id)))
    }
}

/// Demand accumulated over one planning run
#[derive(Debug, Default)]
struct Accumulator {
    /// Roasted grams still to produce, per coffee
    roasted_needed: Tally,
    /// Part of `roasted_needed` ordered as the coffee itself
    single_needs: Tally,
    /// Part of `roasted_needed` ordered through each blend, per blend
    blend_component_needs: Vec<(Uuid, Tally)>,
}

impl Accumulator {
    fn add_single_demand(&mut self, coffee_id: Uuid, remaining: f64) {
        self.roasted_needed.add(coffee_id, remaining);
        self.single_needs.add(coffee_id, remaining);
    }

    fn add_blend_demand(&mut self, blend: &Blend, remaining: f64) {
        for component in &blend.components {
            let component_roasted = remaining * (component.percentage / 100.0);
            self.roasted_needed.add(component.coffee_id, component_roasted);
            self.blend_needs_mut(blend.id)
                .add(component.coffee_id, component_roasted);
        }
    }

    fn blend_needs_mut(&mut self, blend_id: Uuid) -> &mut Tally {
        let position = match self
            .blend_component_needs
            .iter()
            .position(|(id, _)| *id == blend_id)
        {
            Some(position) => position,
            None => {
                self.blend_component_needs.push((blend_id, Tally::default()));
                self.blend_component_needs.len() - 1
            }
        };
        &mut self.blend_component_needs[position].1
    }

    fn blend_need_for(&self, coffee_id: &Uuid) -> f64 {
        self.blend_component_needs
            .iter()
            .fold(0.0, |acc, (_, needs)| acc + needs.get(coffee_id))
    }

    /// Split a coffee's roasted output between its single-origin demand and
    /// each blend that used it, crediting the positive leftovers to the ledger.
    fn credit_surplus(&self, requirement: &RoastRequirement, ledger: &mut OnHandLookup) {
        let coffee_id = requirement.coffee_id;
        let output = requirement.total_roasted_output;

        let blend_need = self.blend_need_for(&coffee_id);
        let single_need = self.single_needs.get(&coffee_id);
        let total_need = or_one(blend_need + single_need);

        let output_for_blend = if blend_need > 0.0 {
            output * (blend_need / total_need)
        } else {
            0.0
        };
        let output_for_singles = output - output_for_blend;

        let surplus_singles = output_for_singles - single_need;
        if surplus_singles > 0.0 {
            *ledger.coffees.entry(coffee_id).or_insert(0.0) += surplus_singles;
        }

        if blend_need > 0.0 {
            for (blend_id, needs) in &self.blend_component_needs {
                let need_for_blend = needs.get(&coffee_id);
                if need_for_blend == 0.0 || need_for_blend.is_nan() {
                    continue;
                }
                let share = need_for_blend / blend_need;
                let surplus = output_for_blend * share - need_for_blend;
                if surplus > 0.0 {
                    *ledger.blends.entry(*blend_id).or_insert(0.0) += surplus;
                }
            }
        }
    }
}

/// Zero and NaN denominators fall back to 1
fn or_one(value: f64) -> f64 {
    if value == 0.0 || value.is_nan() {
        1.0
    } else {
        value
    }
}

/// Take up to `desired` grams out of a bucket and return what is still missing.
///
/// The bucket entry is written even when it was absent, leaving 0 behind.
fn consume_on_hand(bucket: &mut BTreeMap<Uuid, f64>, id: Uuid, desired: f64) -> f64 {
    let available = bucket.get(&id).copied().unwrap_or(0.0);
    let remaining = (desired - available).max(0.0);
    bucket.insert(id, (available - desired).max(0.0));
    remaining
}

/// Green grams needed to end up with `roasted_g` after roasting.
///
/// A 100% roast loss would divide by zero; it is treated as no loss instead.
pub fn green_for_roasted(roasted_g: f64, roast_loss_fraction: f64) -> f64 {
    roasted_g / or_one(1.0 - roast_loss_fraction)
}

/// Drop count as a whole float, unbounded
fn whole_drops(green_g: f64) -> f64 {
    (green_g / DROP_SIZE_G).ceil()
}

/// Whole drops needed to charge `green_g` into the roaster.
///
/// Counts beyond `u64::MAX` report `u64::MAX`; non-positive green needs none.
pub fn drops_for_green(green_g: f64) -> u64 {
    let drops = whole_drops(green_g);
    drops
        .to_u64()
        .unwrap_or(if drops > 0.0 { u64::MAX } else { 0 })
}

/// Size the roast for one coffee: green mass, drops, output and surplus
pub fn size_roast(coffee_id: Uuid, roasted_g: f64, roast_loss_fraction: f64) -> RoastRequirement {
    let required_green_g = green_for_roasted(roasted_g, roast_loss_fraction);
    let drops_required = drops_for_green(required_green_g);
    let total_green = whole_drops(required_green_g) * DROP_SIZE_G;
    let total_roasted_output = total_green * (1.0 - roast_loss_fraction);

    RoastRequirement {
        coffee_id,
        required_roasted_g: roasted_g,
        required_green_g,
        drops_required,
        total_green,
        total_roasted_output,
        surplus_roasted_g: total_roasted_output - roasted_g,
    }
}

/// Run the allocation engine over one planning input.
///
/// Order lines are served from on-hand stock of their own target first, in
/// arrival order. Unmapped lines and lines naming a blend missing from the
/// catalogue are skipped. Rows come out in the order their coffee was first
/// reached and only for coffees that still need roasting.
pub fn plan_roast(input: &RoastInput) -> RoastPlan {
    let coffees = CoffeeIndex::new(&input.coffees);
    let blends: HashMap<Uuid, &Blend> = input.blends.iter().map(|b| (b.id, b)).collect();

    let mut on_hand = input.on_hand.clone();
    let mut acc = Accumulator::default();

    for line in &input.orders {
        let base_needed = line.base_needed();
        match line.target {
            OrderTarget::Blend(blend_id) => {
                let Some(blend) = blends.get(&blend_id) else {
                    continue;
                };
                let remaining = consume_on_hand(&mut on_hand.blends, blend.id, base_needed);
                acc.add_blend_demand(blend, remaining);
            }
            OrderTarget::Coffee(coffee_id) => {
                let remaining = consume_on_hand(&mut on_hand.coffees, coffee_id, base_needed);
                acc.add_single_demand(coffee_id, remaining);
            }
            OrderTarget::Unmapped => {}
        }
    }

    let mut results = Vec::new();
    for (coffee_id, roasted) in acc.roasted_needed.iter() {
        if roasted <= 0.0 {
            continue;
        }
        let requirement = size_roast(coffee_id, roasted, coffees.roast_loss_fraction(&coffee_id));
        acc.credit_surplus(&requirement, &mut on_hand);
        results.push(format_calculation(&requirement, &coffees));
    }

    RoastPlan {
        results,
        on_hand_after: on_hand,
    }
}
