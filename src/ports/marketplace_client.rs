//! Marketplace client port.
//!
//! Fetches full event details for a notification token from a marketplace
//! endpoint. The endpoint varies per call since each notification names the
//! marketplace it came from.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::integration::EventInfo;

/// Errors from marketplace API calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    /// The request could not be sent or no response arrived.
    #[error("Marketplace request failed: {0}")]
    Network(String),

    /// The marketplace answered with a non-success status.
    #[error("Marketplace returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The response body was not a readable event.
    #[error("Invalid marketplace response: {0}")]
    InvalidResponse(String),

    /// The client could not be constructed.
    #[error("Marketplace client misconfigured: {0}")]
    Configuration(String),
}

impl MarketplaceError {
    pub fn network(message: impl Into<String>) -> Self {
        MarketplaceError::Network(message.into())
    }

    pub fn api(status: u16, body: impl Into<String>) -> Self {
        MarketplaceError::Api {
            status,
            body: body.into(),
        }
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        MarketplaceError::InvalidResponse(message.into())
    }
}

/// Port for reading marketplace events.
#[async_trait]
pub trait MarketplaceClient: Send + Sync {
    /// Reads the event identified by `token` from the marketplace at `base_url`.
    ///
    /// Returns `None` when the marketplace does not know the token.
    async fn read_event(
        &self,
        base_url: &str,
        token: &str,
    ) -> Result<Option<EventInfo>, MarketplaceError>;
}
