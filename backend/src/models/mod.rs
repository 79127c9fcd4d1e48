//! Domain models for the Roast Mate server
//!
//! Re-exports models from the shared crate

pub use shared::models::*;
