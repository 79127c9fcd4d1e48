//! HTTP request handlers

pub mod health;
pub mod orders;
pub mod planning;
pub mod reporting;
pub mod settings;

pub use health::*;
pub use orders::*;
pub use planning::*;
pub use reporting::*;
pub use settings::*;
