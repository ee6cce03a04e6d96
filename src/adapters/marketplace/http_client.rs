//! Marketplace event API client.
//!
//! Implements the `MarketplaceClient` port over HTTP. Each request is signed
//! with the integration's OAuth consumer credentials.
//!
//! # Configuration
//!
//! ```ignore
//! let client = HttpMarketplaceClient::from_config(&config.marketplace)?;
//! let event = client.read_event("https://marketplace.example.com", token).await?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use secrecy::SecretString;

use crate::config::MarketplaceConfig;
use crate::domain::integration::EventInfo;
use crate::ports::{MarketplaceClient, MarketplaceError};

use super::oauth::OAuthSigner;

const EVENTS_PATH: &str = "/api/integration/v1/events";

/// Longest error body kept for logs and `MarketplaceError::Api`.
const MAX_ERROR_BODY_BYTES: usize = 512;

/// HTTP client settings for the marketplace API.
#[derive(Debug, Clone)]
pub struct MarketplaceClientConfig {
    consumer_key: String,
    consumer_secret: SecretString,
    request_timeout: Duration,
}

impl MarketplaceClientConfig {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: SecretString::new(consumer_secret.into()),
            request_timeout: Duration::from_secs(30),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

impl From<&MarketplaceConfig> for MarketplaceClientConfig {
    fn from(config: &MarketplaceConfig) -> Self {
        Self {
            consumer_key: config.consumer_key.clone(),
            consumer_secret: config.consumer_secret.clone(),
            request_timeout: config.request_timeout(),
        }
    }
}

/// Reads events from any marketplace that issued our consumer credentials.
pub struct HttpMarketplaceClient {
    http_client: reqwest::Client,
    signer: OAuthSigner,
}

impl HttpMarketplaceClient {
    pub fn new(config: MarketplaceClientConfig) -> Result<Self, MarketplaceError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| MarketplaceError::Configuration(e.to_string()))?;

        Ok(Self {
            http_client,
            signer: OAuthSigner::new(config.consumer_key, config.consumer_secret),
        })
    }

    pub fn from_config(config: &MarketplaceConfig) -> Result<Self, MarketplaceError> {
        Self::new(MarketplaceClientConfig::from(config))
    }
}

fn event_url(base_url: &str, token: &str) -> String {
    format!(
        "{}{}/{}",
        base_url.trim_end_matches('/'),
        EVENTS_PATH,
        urlencoding::encode(token)
    )
}

#[async_trait]
impl MarketplaceClient for HttpMarketplaceClient {
    async fn read_event(
        &self,
        base_url: &str,
        token: &str,
    ) -> Result<Option<EventInfo>, MarketplaceError> {
        let url = event_url(base_url, token);
        let authorization = self.signer.authorization_header("GET", &url);

        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(marketplace = %base_url, error = %e, "Marketplace request failed");
                MarketplaceError::network(e.to_string())
            })?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            tracing::debug!(marketplace = %base_url, "Marketplace does not know event token");
            return Ok(None);
        }
        if !status.is_success() {
            let body = truncate_body(response.text().await.unwrap_or_default());
            tracing::error!(
                marketplace = %base_url,
                status = status.as_u16(),
                body = %body,
                "Marketplace event read failed"
            );
            return Err(MarketplaceError::api(status.as_u16(), body));
        }

        let event: EventInfo = response.json().await.map_err(|e| {
            MarketplaceError::invalid_response(format!("Failed to parse event: {}", e))
        })?;
        Ok(Some(event))
    }
}

/// Cuts `body` to `MAX_ERROR_BODY_BYTES`, on a char boundary.
fn truncate_body(mut body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_BYTES {
        return body;
    }
    let mut end = MAX_ERROR_BODY_BYTES;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    body.truncate(end);
    body.push_str("...");
    body
}
