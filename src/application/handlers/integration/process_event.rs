//! EventDispatcher - Fetches a marketplace event and applies it.
//!
//! One call handles one notification:
//!
//! 1. Resolve the marketplace endpoint and token (from the callback URL, or
//!    the configured endpoint plus a bare token)
//! 2. Read the event from the marketplace
//! 3. Validate it; rejected events never reach a handler
//! 4. Run the handler for the event type inside a store transaction
//! 5. Commit and return the result
//!
//! A fatal error leaves the transaction uncommitted.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::domain::integration::{
    validate_event, ApiResult, ErrorCode, EventEndpoint, EventInfo, EventType,
};
use crate::ports::{MarketplaceClient, SubscriberStore, SubscriberTransaction};

use super::addon::{addon_cancel, addon_change, addon_order};
use super::error::IntegrationError;
use super::subscription::{
    subscription_cancel, subscription_change, subscription_notice, subscription_order,
};
use super::user_assignment::{user_assignment, user_unassignment};

/// Command to process one marketplace notification.
#[derive(Debug, Clone, Default)]
pub struct ProcessEventCommand {
    /// Event-callback URL sent by the marketplace.
    pub event_url: Option<String>,
    /// Bare event token, used when no callback URL is given.
    pub token: Option<String>,
}

/// Dispatches marketplace events to their handlers.
pub struct EventDispatcher {
    marketplace: Arc<dyn MarketplaceClient>,
    store: Arc<dyn SubscriberStore>,
    default_base_url: String,
}

impl EventDispatcher {
    pub fn new(
        marketplace: Arc<dyn MarketplaceClient>,
        store: Arc<dyn SubscriberStore>,
        default_base_url: impl Into<String>,
    ) -> Self {
        Self {
            marketplace,
            store,
            default_base_url: default_base_url.into(),
        }
    }

    pub async fn handle(&self, cmd: ProcessEventCommand) -> Result<ApiResult, IntegrationError> {
        self.process_event(cmd.event_url.as_deref(), cmd.token.as_deref())
            .await
    }

    /// Processes one notification and returns the result to report.
    ///
    /// Business failures come back as `Ok` with a failed [`ApiResult`].
    pub async fn process_event(
        &self,
        event_url: Option<&str>,
        token: Option<&str>,
    ) -> Result<ApiResult, IntegrationError> {
        let (endpoint, from_callback) = self.resolve_endpoint(event_url, token)?;

        let event = self
            .marketplace
            .read_event(&endpoint.base_url, &endpoint.token)
            .await?;

        let expected_origin = from_callback.then_some(endpoint.base_url.as_str());
        let (event, event_type) = match validate_event(event, expected_origin) {
            Ok(accepted) => accepted,
            Err(rejected) => {
                warn!(
                    marketplace = %endpoint.base_url,
                    reason = rejected.message().unwrap_or_default(),
                    "Rejected marketplace event"
                );
                return Ok(rejected);
            }
        };

        info!(
            event_type = %event_type,
            marketplace = %endpoint.base_url,
            "Dispatching marketplace event"
        );

        let mut tx = self.store.begin().await?;
        let result = match dispatch(tx.as_mut(), &event, &event_type, &endpoint.base_url).await {
            Ok(result) => result,
            Err(IntegrationError::IncompleteEvent(missing)) => {
                warn!(event_type = %event_type, section = missing.section, "Incomplete event");
                ApiResult::failure(ErrorCode::UnknownError, missing.to_string())
            }
            Err(err) => {
                error!(event_type = %event_type, error = %err, "Event dispatch aborted");
                return Err(err);
            }
        };
        tx.commit().await?;

        info!(
            event_type = %event_type,
            success = result.is_success(),
            error_code = result.error_code().map(|code| code.as_str()).unwrap_or_default(),
            "Marketplace event processed"
        );
        Ok(result)
    }

    /// Returns the endpoint to read from, and whether it came from a callback URL.
    fn resolve_endpoint(
        &self,
        event_url: Option<&str>,
        token: Option<&str>,
    ) -> Result<(EventEndpoint, bool), IntegrationError> {
        if let Some(url) = non_blank(event_url) {
            return Ok((EventEndpoint::from_event_url(url)?, true));
        }

        let token = non_blank(token).ok_or(IntegrationError::MissingToken)?;
        let endpoint = EventEndpoint::new(self.default_base_url.trim_end_matches('/'), token);
        Ok((endpoint, false))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

async fn dispatch(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
    event_type: &EventType,
    marketplace_base_url: &str,
) -> Result<ApiResult, IntegrationError> {
    match event_type {
        EventType::SubscriptionOrder => subscription_order(tx, event, marketplace_base_url).await,
        EventType::SubscriptionChange => subscription_change(tx, event, marketplace_base_url).await,
        EventType::SubscriptionCancel => subscription_cancel(tx, event).await,
        EventType::SubscriptionNotice => Ok(subscription_notice(event)),
        EventType::UserAssignment => user_assignment(tx, event).await,
        EventType::UserUnassignment => user_unassignment(tx, event).await,
        EventType::AddonOrder => addon_order(tx, event).await,
        EventType::AddonChange => addon_change(tx, event).await,
        EventType::AddonCancel => addon_cancel(tx, event).await,
        EventType::Unknown(other) => Ok(ApiResult::failure(
            ErrorCode::UnknownError,
            format!("Event type not supported by this endpoint: {}", other),
        )),
    }
}
