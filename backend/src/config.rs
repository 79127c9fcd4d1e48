//! Configuration management for the Roast Mate server
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with ROAST_MATE_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Marketplace order import defaults
    pub import: ImportConfig,

    /// Report rendering configuration
    pub reports: ReportsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImportConfig {
    /// Bag size assumed when a product title names no size
    pub default_size_g: u32,

    /// Grind assumed when a line item carries no grind property
    pub default_grind: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReportsConfig {
    /// Title printed on report headers
    pub title: String,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("ROAST_MATE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("import.default_size_g", 250)?
            .set_default("import.default_grind", "Whole Bean")?
            .set_default("reports.title", "Roast Mate")?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (ROAST_MATE_ prefix)
            .add_source(
                Environment::with_prefix("ROAST_MATE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            server: ServerConfig::default(),
            import: ImportConfig::default(),
            reports: ReportsConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_size_g: 250,
            default_grind: "Whole Bean".to_string(),
        }
    }
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            title: "Roast Mate".to_string(),
        }
    }
}
