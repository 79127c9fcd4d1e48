//! Roast allocation engine
//!
//! Turns included order lines, the coffee and blend catalogue, and the
//! roasted stock already on hand into per-coffee roasting requirements and
//! the on-hand ledger to carry into the next session:
//! - `ledger`: stock records to lookup tables
//! - `allocation`: inventory-first consumption, blend expansion, drop rounding
//!   and surplus re-attribution
//! - `formatter`: attach catalogue details to requirement rows
//!
//! Every call is a pure function of its inputs.

mod allocation;
mod formatter;
mod ledger;

pub use allocation::*;
pub use formatter::*;
pub use ledger::*;

/// Green coffee charged into the roaster per drop
pub const DROP_SIZE_G: f64 = 5000.0;
