//! Business logic services for Roast Mate

pub mod orders;
pub mod planning;
pub mod reporting;
pub mod settings;

pub use orders::OrderImportService;
pub use planning::PlanningService;
pub use reporting::ReportingService;
pub use settings::SettingsService;
