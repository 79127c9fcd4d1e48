//! Shared types and models for the Roast Mate planning platform
//!
//! This crate contains the roast allocation engine and the types shared
//! between the backend, the browser client (via WASM), and reports.

pub mod models;
pub mod planning;
pub mod reports;
pub mod types;
pub mod validation;

pub use models::*;
pub use planning::*;
pub use types::*;
pub use validation::*;
