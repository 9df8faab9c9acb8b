//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Analysis delay of {0} ms exceeds the 60000 ms maximum")]
    InvalidAnalysisDelay(u64),

    #[error("Checkout URL must start with http:// or https://")]
    InvalidCheckoutUrl,

    #[error("Offer countdown must be between 1 minute and 24 hours")]
    InvalidOfferWindow,
}
