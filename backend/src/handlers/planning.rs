//! Roast planning handlers

use axum::Json;

use crate::error::AppResult;
use crate::services::planning::{
    CalculatePlanInput, CalculatedPlan, PlanningService, StartSessionInput, StartedSession,
};

/// Start a roast session over the unassigned orders
pub async fn start_session(Json(input): Json<StartSessionInput>) -> Json<StartedSession> {
    Json(PlanningService::new().start_session(input))
}

/// Calculate the roast plan for a session
pub async fn calculate_plan(
    Json(input): Json<CalculatePlanInput>,
) -> AppResult<Json<CalculatedPlan>> {
    let plan = PlanningService::new().calculate(input)?;
    Ok(Json(plan))
}
