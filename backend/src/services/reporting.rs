//! Session report rendering and export

use chrono::NaiveDate;
use serde::Deserialize;
use shared::planning::format_calculations;
use shared::reports::{render_bagging_report, render_roasting_report, summarize_bagging};

use crate::config::ReportsConfig;
use crate::error::{AppError, AppResult};
use crate::models::{Blend, Coffee, Order, RoastCalculation, RoastRequirement};

/// Input for the roasting report
#[derive(Debug, Deserialize)]
pub struct RoastingReportInput {
    pub session_date: NaiveDate,
    pub results: Vec<RoastCalculation>,
    #[serde(default)]
    pub coffees: Vec<Coffee>,
}

/// Input for the bagging report
#[derive(Debug, Deserialize)]
pub struct BaggingReportInput {
    pub session_date: NaiveDate,
    pub orders: Vec<Order>,
    #[serde(default)]
    pub coffees: Vec<Coffee>,
    #[serde(default)]
    pub blends: Vec<Blend>,
}

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    config: ReportsConfig,
}

fn session_label(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

impl ReportingService {
    pub fn new(config: ReportsConfig) -> Self {
        Self { config }
    }

    /// Stored rows are re-labelled against the catalogue when one is supplied
    pub fn roasting_report(&self, input: &RoastingReportInput) -> String {
        let rows = if input.coffees.is_empty() {
            input.results.clone()
        } else {
            let requirements: Vec<RoastRequirement> =
                input.results.iter().map(RoastRequirement::from).collect();
            format_calculations(&requirements, &input.coffees)
        };

        render_roasting_report(
            &self.config.title,
            &session_label(&input.session_date),
            &rows,
            &input.coffees,
        )
    }

    pub fn bagging_report(&self, input: &BaggingReportInput) -> AppResult<String> {
        let summary = summarize_bagging(&input.orders, &input.coffees, &input.blends)?;
        tracing::debug!(
            "Bagging {} SKUs across {} targets",
            summary.skus.len(),
            summary.allocations.len()
        );
        Ok(render_bagging_report(&session_label(&input.session_date), &summary))
    }

    /// Export roasting rows to CSV format
    pub fn export_to_csv(rows: &[RoastCalculation]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for row in rows {
            wtr.serialize(row).map_err(anyhow::Error::from)?;
        }
        let bytes = wtr
            .into_inner()
            .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?;
        String::from_utf8(bytes)
            .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::reports::ReportError;
    use uuid::Uuid;

    fn row() -> RoastCalculation {
        RoastCalculation {
            coffee_id: Uuid::nil(),
            coffee_name: "Ethiopia Guji".to_string(),
            roast_loss_percentage: 15.0,
            required_roasted_g: 1000.0,
            required_green_g: 1000.0 / 0.85,
            drops_required: 1,
            total_green: 5000.0,
            total_roasted_output: 4250.0,
            surplus_roasted_g: 3250.0,
        }
    }

    #[test]
    fn test_export_to_csv() {
        let csv = ReportingService::export_to_csv(&[row()]).unwrap();
        let mut lines = csv.lines();
        assert!(lines.next().unwrap().starts_with("coffee_id,coffee_name,roast_loss_percentage"));
        let record = lines.next().unwrap();
        assert!(record.contains("Ethiopia Guji"));
        assert!(record.ends_with(",1,5000.0,4250.0,3250.0"));
    }

    #[test]
    fn test_roasting_report_uses_configured_title() {
        let service = ReportingService::new(ReportsConfig {
            title: "Demo Roastery".to_string(),
        });
        let report = service.roasting_report(&RoastingReportInput {
            session_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            results: vec![row()],
            coffees: vec![],
        });
        assert!(report.starts_with("Demo Roastery - Roasting Report"));
        assert!(report.contains("Session: 2024-05-06"));
    }

    #[test]
    fn test_roasting_report_relabels_against_catalogue() {
        let mut renamed = Coffee::new("Ethiopia Guji Natural", 16.0);
        renamed.id = Uuid::nil();
        let service = ReportingService::new(ReportsConfig::default());

        let report = service.roasting_report(&RoastingReportInput {
            session_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            results: vec![row()],
            coffees: vec![renamed],
        });
        assert!(report.contains("Ethiopia Guji Natural\n"));
        assert!(report.contains("Drops: 1 x 5kg"));
    }

    #[test]
    fn test_bagging_without_orders() {
        let service = ReportingService::new(ReportsConfig::default());
        let result = service.bagging_report(&BaggingReportInput {
            session_date: NaiveDate::from_ymd_opt(2024, 5, 6).unwrap(),
            orders: vec![],
            coffees: vec![],
            blends: vec![],
        });
        assert!(matches!(
            result,
            Err(AppError::Report(ReportError::NoIncludedOrders))
        ));
    }
}
