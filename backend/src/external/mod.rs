//! External marketplace integrations

pub mod shopify;
