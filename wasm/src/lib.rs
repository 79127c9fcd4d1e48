//! WebAssembly module for Roast Mate
//!
//! Provides client-side computation for:
//! - Roast planning previews from the session screen
//! - Drop and green-mass sizing
//! - Blend proportion checks while editing the catalogue

use rust_decimal::prelude::ToPrimitive;
use shared::planning;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    // Set up panic hook for better error messages in browser console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

fn js_error(message: String) -> JsValue {
    js_sys::Error::new(&message).into()
}

/// Plan from a JSON `RoastInput`, returning the plan and any blend warnings
fn run_plan(input_json: &str) -> Result<(RoastPlan, Vec<String>), String> {
    let input: RoastInput =
        serde_json::from_str(input_json).map_err(|e| format!("Invalid roast input JSON: {}", e))?;

    let warnings = input
        .blends
        .iter()
        .filter_map(|blend| {
            let percentages: Vec<f64> = blend.components.iter().map(|c| c.percentage).collect();
            validate_blend_proportions(&percentages)
                .err()
                .map(|reason| format!("Blend {}: {}", blend.name, reason))
        })
        .collect();

    Ok((planning::plan_roast(&input), warnings))
}

/// Run the allocation engine over a JSON `RoastInput`
#[wasm_bindgen(js_name = plan_roast)]
pub fn plan_roast_json(input_json: &str) -> Result<String, JsValue> {
    let (plan, warnings) = run_plan(input_json).map_err(js_error)?;
    for warning in warnings {
        web_sys::console::warn_1(&JsValue::from_str(&warning));
    }
    serde_json::to_string(&plan).map_err(|e| js_error(format!("Plan serialization failed: {}", e)))
}

/// Whole 5kg drops needed for an amount of green coffee
#[wasm_bindgen]
pub fn drops_for_green(green_g: f64) -> u64 {
    planning::drops_for_green(green_g)
}

/// Green grams needed for an amount of roasted coffee at a roast loss percentage
#[wasm_bindgen]
pub fn green_for_roasted(roasted_g: f64, roast_loss_percentage: f64) -> f64 {
    planning::green_for_roasted(roasted_g, roast_loss_percentage / 100.0)
}

/// Check a JSON array of blend percentages sums to 100
#[wasm_bindgen]
pub fn validate_blend(percentages_json: &str) -> bool {
    serde_json::from_str::<Vec<f64>>(percentages_json)
        .map(|percentages| validate_blend_proportions(&percentages).is_ok())
        .unwrap_or(false)
}

/// Estimated green cost; 0 when the price cannot be represented
#[wasm_bindgen]
pub fn estimate_green_cost(cost_per_kg: f64, green_g: f64) -> f64 {
    let coffee = Coffee {
        cost_per_kg: rust_decimal::Decimal::try_from(cost_per_kg).ok(),
        ..Coffee::new("estimate", 0.0)
    };
    coffee
        .green_cost(green_g)
        .and_then(|cost| cost.to_f64())
        .unwrap_or(0.0)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_plan_roast_rejects_bad_json() {
        assert!(plan_roast_json("{").is_err());
        assert_eq!(
            plan_roast_json("{\"coffees\":[],\"blends\":[],\"orders\":[]}").unwrap(),
            "{\"results\":[],\"on_hand_after\":{\"coffees\":{},\"blends\":{}}}"
        );
    }
}
