//! HTTP DTOs for the integration endpoints.
//!
//! The successful response body is the dispatch result itself
//! (`ApiResult`), which is already in the marketplace's wire format.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string of an event notification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventNotificationQuery {
    /// Event-callback URL (`{eventUrl}` placeholder of the marketplace listing).
    #[serde(default)]
    pub url: Option<String>,
    /// Bare event token, for marketplaces that send no callback URL.
    #[serde(default)]
    pub token: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Standard error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
