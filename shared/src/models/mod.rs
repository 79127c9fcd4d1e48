//! Domain models for the Roast Mate planning platform

mod blend;
mod coffee;
mod order;
mod roast;
mod stock;

pub use blend::*;
pub use coffee::*;
pub use order::*;
pub use roast::*;
pub use stock::*;
