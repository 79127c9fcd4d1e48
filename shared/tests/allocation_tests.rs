//! Roast allocation engine tests
//!
//! Tests for roast planning including:
//! - Drop rounding: whole 5kg drops, never under-roasting
//! - Inventory-first consumption of on-hand stock
//! - Blend proportionality across components
//! - Empty input leaves the ledger untouched

use proptest::prelude::*;
use shared::models::{
    Blend, BlendComponent, Coffee, OnHandLookup, OnHandStock, OrderLine, RoastInput,
};
use shared::planning::{build_on_hand_lookup, plan_roast, DROP_SIZE_G};

const TOLERANCE: f64 = 1e-6;

fn single_coffee_input(
    loss: f64,
    size_g: u32,
    quantity: u32,
    on_hand_g: f64,
) -> (Coffee, RoastInput) {
    let coffee = Coffee::new("Ethiopia Guji", loss);
    let on_hand = build_on_hand_lookup(&[OnHandStock::coffee(coffee.id, on_hand_g)]);
    let input = RoastInput {
        coffees: vec![coffee.clone()],
        blends: vec![],
        orders: vec![OrderLine::coffee(coffee.id, size_g, quantity)],
        on_hand,
    };
    (coffee, input)
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_empty_orders_yield_empty_plan() {
        let coffee = Coffee::new("Kenya Nyeri", 14.0);
        let mut on_hand = OnHandLookup::default();
        on_hand.coffees.insert(coffee.id, 750.0);

        let input = RoastInput {
            coffees: vec![coffee],
            blends: vec![],
            orders: vec![],
            on_hand: on_hand.clone(),
        };

        let plan = plan_roast(&input);
        assert!(plan.results.is_empty());
        assert_eq!(plan.on_hand_after, on_hand);
    }

    #[test]
    fn test_partial_stock_reduces_roast() {
        // 1000g ordered, 400g on hand, 600g left to roast
        let (coffee, input) = single_coffee_input(15.0, 250, 4, 400.0);
        let plan = plan_roast(&input);

        assert_eq!(plan.results.len(), 1);
        assert!((plan.results[0].required_roasted_g - 600.0).abs() < TOLERANCE);
        // Consumed stock leaves 0, then the drop surplus is credited back
        let expected_surplus = 5000.0 * 0.85 - 600.0;
        assert!((plan.on_hand_after.coffee(&coffee.id) - expected_surplus).abs() < TOLERANCE);
    }

    #[test]
    fn test_blend_stock_consumed_before_components() {
        let x = Coffee::new("Brazil Cerrado", 15.0);
        let y = Coffee::new("Colombia Huila", 12.0);
        let blend = Blend::new(
            "Smooth Criminal",
            vec![BlendComponent::new(x.id, 60.0), BlendComponent::new(y.id, 40.0)],
        );
        let on_hand = build_on_hand_lookup(&[
            OnHandStock::blend(blend.id, 1500.0),
            // Single-origin stock is never used for blend demand
            OnHandStock::coffee(x.id, 10_000.0),
        ]);

        let input = RoastInput {
            coffees: vec![x.clone(), y.clone()],
            blends: vec![blend.clone()],
            orders: vec![OrderLine::blend(blend.id, 1000, 2)],
            on_hand,
        };

        let plan = plan_roast(&input);
        let total: f64 = plan.results.iter().map(|r| r.required_roasted_g).sum();
        assert!((total - 500.0).abs() < TOLERANCE);
        assert_eq!(plan.on_hand_after.coffee(&x.id), 10_000.0);
    }

    #[test]
    fn test_multiple_drops() {
        // 12kg roasted at 15% loss needs 14.1kg green: three drops
        let (_, input) = single_coffee_input(15.0, 1000, 12, 0.0);
        let plan = plan_roast(&input);
        let row = &plan.results[0];

        assert_eq!(row.drops_required, 3);
        assert_eq!(row.total_green, 15_000.0);
        assert_eq!(plan.total_drops(), 3);
        assert_eq!(plan.total_green(), 15_000.0);
    }

    #[test]
    fn test_two_blends_share_a_coffee() {
        let x = Coffee::new("Brazil Cerrado", 15.0);
        let y = Coffee::new("Colombia Huila", 12.0);
        let espresso = Blend::new(
            "House Espresso",
            vec![BlendComponent::new(x.id, 50.0), BlendComponent::new(y.id, 50.0)],
        );
        let filter = Blend::new("Filter", vec![BlendComponent::new(x.id, 100.0)]);

        let input = RoastInput {
            coffees: vec![x.clone(), y.clone()],
            blends: vec![espresso.clone(), filter.clone()],
            orders: vec![
                OrderLine::blend(espresso.id, 1000, 2),
                OrderLine::blend(filter.id, 1000, 3),
            ],
            on_hand: OnHandLookup::default(),
        };

        let plan = plan_roast(&input);
        let row_x = plan.results.iter().find(|r| r.coffee_id == x.id).unwrap();
        assert!((row_x.required_roasted_g - 4000.0).abs() < TOLERANCE);

        // X output (4250) splits 1000:3000 between the two blends
        let espresso_from_x = 4250.0 * 0.25 - 1000.0;
        let filter_from_x = 4250.0 * 0.75 - 3000.0;
        let espresso_from_y = 4400.0 - 1000.0;

        assert!(
            (plan.on_hand_after.blend(&espresso.id) - (espresso_from_x + espresso_from_y)).abs()
                < TOLERANCE
        );
        assert!((plan.on_hand_after.blend(&filter.id) - filter_from_x).abs() < TOLERANCE);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Typical roast loss range, 10.0% to 25.0%
    fn roast_loss_strategy() -> impl Strategy<Value = f64> {
        (100u32..=250u32).prop_map(|n| f64::from(n) / 10.0)
    }

    fn bag_size_strategy() -> impl Strategy<Value = u32> {
        prop_oneof![Just(250u32), Just(500u32), Just(1000u32)]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Total green is always whole drops
        #[test]
        fn prop_total_green_is_whole_drops(
            loss in roast_loss_strategy(),
            size in bag_size_strategy(),
            quantity in 1u32..=80
        ) {
            let (_, input) = single_coffee_input(loss, size, quantity, 0.0);
            let plan = plan_roast(&input);

            for row in &plan.results {
                prop_assert_eq!(row.total_green % DROP_SIZE_G, 0.0);
                prop_assert_eq!(row.drops_required as f64, row.total_green / DROP_SIZE_G);
            }
        }

        /// Rounding up to whole drops never under-roasts
        #[test]
        fn prop_output_covers_requirement(
            loss in roast_loss_strategy(),
            size in bag_size_strategy(),
            quantity in 1u32..=80
        ) {
            let (_, input) = single_coffee_input(loss, size, quantity, 0.0);
            let plan = plan_roast(&input);

            let row = &plan.results[0];
            prop_assert!(row.total_roasted_output + TOLERANCE >= row.required_roasted_g);
            prop_assert!(row.surplus_roasted_g > -TOLERANCE);
            prop_assert!(
                (row.surplus_roasted_g - (row.total_roasted_output - row.required_roasted_g)).abs()
                    < TOLERANCE
            );
        }

        /// Orders far past the u32 drop range are still fully covered
        #[test]
        fn prop_huge_orders_never_under_roast(
            loss in roast_loss_strategy(),
            size in 1_000_000u32..=u32::MAX,
            quantity in 1_000u32..=u32::MAX
        ) {
            let (_, input) = single_coffee_input(loss, size, quantity, 0.0);
            let plan = plan_roast(&input);

            // Past 2^53 every float is whole, so allow relative rounding error
            let row = &plan.results[0];
            let slack = row.required_roasted_g * 1e-9;
            prop_assert!(row.total_green * (1.0 + 1e-9) >= row.required_green_g);
            prop_assert!(row.total_roasted_output + slack >= row.required_roasted_g);
            prop_assert!(row.surplus_roasted_g >= -slack);
            prop_assert_eq!(row.drops_required as f64 * DROP_SIZE_G, row.total_green);
        }

        /// Stock at least as large as the demand means nothing to roast
        #[test]
        fn prop_inventory_first(
            loss in roast_loss_strategy(),
            size in bag_size_strategy(),
            quantity in 1u32..=40,
            extra in 0u32..=5000
        ) {
            let demand = f64::from(size) * f64::from(quantity);
            let stock = demand + f64::from(extra);
            let (coffee, input) = single_coffee_input(loss, size, quantity, stock);
            let plan = plan_roast(&input);

            prop_assert!(plan.results.is_empty());
            let left = plan.on_hand_after.coffee(&coffee.id);
            prop_assert!((left - f64::from(extra)).abs() < TOLERANCE);
        }

        /// Component requirements of one blend line add up to its demand
        #[test]
        fn prop_blend_proportionality(
            share in 1u32..=99,
            size in bag_size_strategy(),
            quantity in 1u32..=40,
            loss_x in roast_loss_strategy(),
            loss_y in roast_loss_strategy()
        ) {
            let x = Coffee::new("X", loss_x);
            let y = Coffee::new("Y", loss_y);
            let blend = Blend::new(
                "XY",
                vec![
                    BlendComponent::new(x.id, f64::from(share)),
                    BlendComponent::new(y.id, f64::from(100 - share)),
                ],
            );
            let input = RoastInput {
                coffees: vec![x, y],
                blends: vec![blend.clone()],
                orders: vec![OrderLine::blend(blend.id, size, quantity)],
                on_hand: OnHandLookup::default(),
            };

            let plan = plan_roast(&input);
            let demand = f64::from(size) * f64::from(quantity);
            let total: f64 = plan.results.iter().map(|r| r.required_roasted_g).sum();

            prop_assert_eq!(plan.results.len(), 2);
            prop_assert!((total - demand).abs() < TOLERANCE);
        }

        /// No orders, no change
        #[test]
        fn prop_empty_orders_idempotent(stock in 0u32..=20_000) {
            let (_, mut input) = single_coffee_input(15.0, 250, 1, f64::from(stock));
            input.orders.clear();

            let plan = plan_roast(&input);
            prop_assert!(plan.results.is_empty());
            prop_assert_eq!(plan.on_hand_after, input.on_hand);
        }
    }
}
