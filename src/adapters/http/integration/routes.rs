//! Axum router configuration for the integration endpoints.

use axum::{routing::get, Router};

use super::handlers::{health, process_event, IntegrationAppState};

/// Create the integration API router.
///
/// # Routes
/// - `GET /events?url=&token=` - Process a marketplace event notification
pub fn integration_routes() -> Router<IntegrationAppState> {
    Router::new().route("/events", get(process_event))
}

/// Create the complete integration module router.
///
/// Mounts the event endpoint under `/api/integration` next to `/health`.
///
/// # Example
///
/// ```ignore
/// let app = integration_router().with_state(IntegrationAppState::new(dispatcher));
/// ```
pub fn integration_router() -> Router<IntegrationAppState> {
    Router::new()
        .nest("/api/integration", integration_routes())
        .route("/health", get(health))
}
