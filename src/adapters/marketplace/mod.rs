//! Marketplace adapters.
//!
//! - `HttpMarketplaceClient` - OAuth-signed HTTP client for the event API

mod http_client;
mod oauth;

pub use http_client::{HttpMarketplaceClient, MarketplaceClientConfig};
pub use oauth::OAuthSigner;
