//! Roast planning service
//!
//! Runs one planning pass for a session: starts the session over the submitted
//! orders, applies skip toggles, and sizes the roast against on-hand stock.

use serde::{Deserialize, Serialize};
use shared::planning::{build_on_hand_lookup, plan_roast};
use shared::types::SessionRef;
use shared::validation::validate_blend_proportions;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    included_order_lines, Blend, Coffee, OnHandLookup, OnHandStock, Order, RoastCalculation,
    RoastInput,
};

/// Skip or unskip one order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkipChange {
    pub order_id: Uuid,
    pub skipped: bool,
}

/// Input for starting a roast session
#[derive(Debug, Deserialize)]
pub struct StartSessionInput {
    pub session_date: Option<chrono::NaiveDate>,
    pub orders: Vec<Order>,
}

#[derive(Debug, Serialize)]
pub struct StartedSession {
    pub session: SessionRef,
    pub orders: Vec<Order>,
}

/// Input for a planning run
#[derive(Debug, Deserialize)]
pub struct CalculatePlanInput {
    pub coffees: Vec<Coffee>,
    pub blends: Vec<Blend>,
    pub orders: Vec<Order>,
    #[serde(default)]
    pub on_hand: Vec<OnHandStock>,
    #[serde(default)]
    pub skip_orders: Vec<SkipChange>,
}

/// Rows to roast plus the ledger carried into the next session
#[derive(Debug, Serialize)]
pub struct CalculatedPlan {
    pub results: Vec<RoastCalculation>,
    pub on_hand: OnHandLookup,
    pub on_hand_stock: Vec<OnHandStock>,
}

/// Planning service
#[derive(Clone, Default)]
pub struct PlanningService;

impl PlanningService {
    pub fn new() -> Self {
        Self
    }

    /// Start a session: every order not yet in one becomes included
    pub fn start_session(&self, input: StartSessionInput) -> StartedSession {
        let session_date = input
            .session_date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let mut orders = input.orders;
        orders.iter_mut().for_each(Order::attach_to_session);

        tracing::info!(
            "Started roast session {} with {} orders",
            session_date,
            orders.iter().filter(|o| o.is_included()).count()
        );

        StartedSession {
            session: SessionRef {
                id: Some(Uuid::new_v4()),
                session_date,
            },
            orders,
        }
    }

    /// Apply skip toggles in submission order
    pub fn apply_skip_changes(
        &self,
        orders: &mut [Order],
        changes: &[SkipChange],
    ) -> AppResult<()> {
        for change in changes {
            let order = orders
                .iter_mut()
                .find(|o| o.id == change.order_id)
                .ok_or_else(|| AppError::NotFound(format!("Order {}", change.order_id)))?;
            order.set_skipped(change.skipped);
        }
        Ok(())
    }

    /// Calculate the roast for the included orders
    pub fn calculate(&self, input: CalculatePlanInput) -> AppResult<CalculatedPlan> {
        let CalculatePlanInput {
            coffees,
            blends,
            mut orders,
            on_hand,
            skip_orders,
        } = input;

        self.apply_skip_changes(&mut orders, &skip_orders)?;

        for blend in &blends {
            let percentages: Vec<f64> = blend.components.iter().map(|c| c.percentage).collect();
            if let Err(reason) = validate_blend_proportions(&percentages) {
                tracing::warn!("Blend {} ({}) used as-is: {}", blend.name, blend.id, reason);
            }
        }

        let order_lines = included_order_lines(&orders);
        tracing::debug!(
            "Planning {} order lines from {} orders",
            order_lines.len(),
            orders.len()
        );

        let plan = plan_roast(&RoastInput {
            coffees,
            blends,
            orders: order_lines,
            on_hand: build_on_hand_lookup(&on_hand),
        });

        tracing::info!(
            "Roast plan: {} coffees, {} drops, {} g green",
            plan.results.len(),
            plan.total_drops(),
            plan.total_green()
        );

        let on_hand_stock = plan.on_hand_after.to_stock_records();
        Ok(CalculatedPlan {
            results: plan.results,
            on_hand: plan.on_hand_after,
            on_hand_stock,
        })
    }
}
