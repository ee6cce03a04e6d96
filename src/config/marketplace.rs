//! Marketplace API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Marketplace endpoint and OAuth consumer credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketplaceConfig {
    /// Default marketplace endpoint, used when a notification carries only a token
    pub base_url: String,

    /// OAuth consumer key issued by the marketplace
    pub consumer_key: String,

    /// OAuth consumer secret issued by the marketplace
    pub consumer_secret: SecretString,

    /// Timeout for event fetches in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl MarketplaceConfig {
    pub fn new(
        base_url: impl Into<String>,
        consumer_key: impl Into<String>,
        consumer_secret: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            consumer_key: consumer_key.into(),
            consumer_secret: SecretString::new(consumer_secret.into()),
            request_timeout_secs: default_request_timeout(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate marketplace configuration.
    ///
    /// Production deployments must talk to the marketplace over HTTPS since the
    /// signed requests carry the consumer key.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("MARKETPLACE__BASE_URL"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidMarketplaceUrl);
        }
        if *environment == Environment::Production && !self.base_url.starts_with("https://") {
            return Err(ValidationError::MarketplaceUrlMustBeHttps);
        }
        if self.consumer_key.is_empty() {
            return Err(ValidationError::MissingRequired("MARKETPLACE__CONSUMER_KEY"));
        }
        if self.consumer_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("MARKETPLACE__CONSUMER_SECRET"));
        }
        if self.request_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_request_timeout() -> u64 {
    30
}
