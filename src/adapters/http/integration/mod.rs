//! HTTP adapter for the marketplace integration endpoints.
//!
//! - `GET /api/integration/events?url=&token=` - Process an event notification
//! - `GET /health` - Liveness probe

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, EventNotificationQuery, HealthResponse};
pub use handlers::{IntegrationApiError, IntegrationAppState};
pub use routes::{integration_router, integration_routes};
