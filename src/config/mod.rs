//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `QUIZ_FUNNEL` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use quiz_funnel::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Running the {} flow", config.flow.variant);
//! ```

mod checkout;
mod error;
mod flow;
mod storage;
mod telemetry;

pub use checkout::CheckoutConfig;
pub use error::{ConfigError, ValidationError};
pub use flow::FlowConfig;
pub use storage::{StorageBackend, StorageConfig};
pub use telemetry::TelemetryConfig;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Flow configuration (variant, analysis delay, deficit policy)
    #[serde(default)]
    pub flow: FlowConfig,

    /// Saved-state storage (backend, data directory)
    #[serde(default)]
    pub storage: StorageConfig,

    /// Checkout hand-off (URL, offer countdown)
    pub checkout: CheckoutConfig,

    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `QUIZ_FUNNEL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `QUIZ_FUNNEL__FLOW__VARIANT=express` -> `flow.variant = express`
    /// - `QUIZ_FUNNEL__CHECKOUT__URL=...` -> `checkout.url = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required environment variables are missing
    /// - Values cannot be parsed into expected types
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("QUIZ_FUNNEL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.flow.validate()?;
        self.storage.validate()?;
        self.checkout.validate()?;
        Ok(())
    }
}
