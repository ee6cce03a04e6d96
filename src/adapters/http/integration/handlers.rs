//! HTTP handlers for the integration endpoints.

use std::sync::Arc;

use axum::extract::{Json, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::integration::{
    EventDispatcher, IntegrationError, ProcessEventCommand,
};

use super::dto::{ErrorResponse, EventNotificationQuery, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the integration routes.
#[derive(Clone)]
pub struct IntegrationAppState {
    pub dispatcher: Arc<EventDispatcher>,
}

impl IntegrationAppState {
    pub fn new(dispatcher: EventDispatcher) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/integration/events - Process a marketplace event notification
///
/// Business failures are still `200 OK`; the marketplace reads the outcome
/// from the body.
pub async fn process_event(
    State(state): State<IntegrationAppState>,
    Query(query): Query<EventNotificationQuery>,
) -> Result<impl IntoResponse, IntegrationApiError> {
    let cmd = ProcessEventCommand {
        event_url: query.url,
        token: query.token,
    };

    let result = state.dispatcher.handle(cmd).await?;
    Ok(Json(result))
}

/// GET /health - Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok" })
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper that converts dispatch errors to HTTP responses.
#[derive(Debug)]
pub struct IntegrationApiError(IntegrationError);

impl From<IntegrationError> for IntegrationApiError {
    fn from(err: IntegrationError) -> Self {
        Self(err)
    }
}

impl IntoResponse for IntegrationApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            IntegrationError::InvalidEventUrl(_) | IntegrationError::MissingToken => {
                (StatusCode::BAD_REQUEST, "INVALID_EVENT_URL")
            }
            IntegrationError::Marketplace(_) => (StatusCode::BAD_GATEWAY, "MARKETPLACE_ERROR"),
            IntegrationError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR"),
            IntegrationError::IncompleteEvent(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::integration::{EventUrlError, IncompleteEvent};
    use crate::ports::{MarketplaceError, StoreError};

    fn status_of(err: IntegrationError) -> StatusCode {
        IntegrationApiError::from(err).into_response().status()
    }

    #[test]
    fn bad_event_urls_are_client_errors() {
        assert_eq!(
            status_of(IntegrationError::InvalidEventUrl(EventUrlError::NotHttp(
                "ftp://x".to_string()
            ))),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(IntegrationError::MissingToken), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn marketplace_errors_are_bad_gateway() {
        assert_eq!(
            status_of(IntegrationError::Marketplace(MarketplaceError::network("timeout"))),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn store_errors_are_internal() {
        assert_eq!(
            status_of(IntegrationError::Store(StoreError::storage("down"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_of(IntegrationError::IncompleteEvent(IncompleteEvent::new("payload"))),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
