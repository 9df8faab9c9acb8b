//! Checkout hand-off configuration

use serde::Deserialize;

use crate::domain::results::OfferCountdown;

use super::error::ValidationError;

/// Checkout configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutConfig {
    /// External payment page the flow redirects to (required)
    pub url: String,

    /// Length of the limited-time offer countdown
    #[serde(default = "default_offer_minutes")]
    pub offer_minutes: u32,
}

impl CheckoutConfig {
    pub fn offer_countdown(&self) -> OfferCountdown {
        OfferCountdown::from_minutes(self.offer_minutes)
    }

    /// Validate checkout configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("checkout.url"));
        }
        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ValidationError::InvalidCheckoutUrl);
        }
        if self.offer_minutes == 0 || self.offer_minutes > 24 * 60 {
            return Err(ValidationError::InvalidOfferWindow);
        }
        Ok(())
    }
}

fn default_offer_minutes() -> u32 {
    15
}
