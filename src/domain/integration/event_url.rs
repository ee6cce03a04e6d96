//! Event-callback URL handling.
//!
//! The marketplace notifies with a URL such as
//! `https://marketplace.example.com/api/integration/v1/events/8f2c...`. Its
//! origin identifies the marketplace endpoint and its last path segment is the
//! event token.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EventUrlError {
    #[error("event URL must be an absolute http(s) URL: {0}")]
    NotHttp(String),

    #[error("event URL has no host: {0}")]
    MissingHost(String),

    #[error("event URL has no event token: {0}")]
    MissingToken(String),
}

/// Where to fetch an event from, and with which token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEndpoint {
    /// `scheme://host[:port]` of the marketplace.
    pub base_url: String,
    pub token: String,
}

impl EventEndpoint {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Splits an event-callback URL into marketplace origin and token.
    pub fn from_event_url(event_url: &str) -> Result<Self, EventUrlError> {
        let trimmed = event_url.trim();
        let (scheme, rest) = trimmed
            .split_once("://")
            .ok_or_else(|| EventUrlError::NotHttp(trimmed.to_string()))?;
        let scheme = scheme.to_ascii_lowercase();
        if scheme != "http" && scheme != "https" {
            return Err(EventUrlError::NotHttp(trimmed.to_string()));
        }

        let authority_end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
        let (authority, remainder) = rest.split_at(authority_end);
        // Drop any userinfo, it is not part of the origin
        let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
        if host.is_empty() {
            return Err(EventUrlError::MissingHost(trimmed.to_string()));
        }

        let path_end = remainder.find(['?', '#']).unwrap_or(remainder.len());
        let token = remainder[..path_end]
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .ok_or_else(|| EventUrlError::MissingToken(trimmed.to_string()))?;
        let token = urlencoding::decode(token)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| token.to_string());

        Ok(Self {
            base_url: format!("{}://{}", scheme, host.to_ascii_lowercase()),
            token,
        })
    }
}

/// Compares a marketplace origin declared by an event with a resolved one.
///
/// Case-insensitive and tolerant of a trailing slash.
pub fn same_origin(declared: &str, resolved: &str) -> bool {
    declared
        .trim()
        .trim_end_matches('/')
        .eq_ignore_ascii_case(resolved.trim().trim_end_matches('/'))
}
