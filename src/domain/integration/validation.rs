//! Checks applied to a fetched event before it is dispatched.

use super::event_url::same_origin;
use super::{ApiResult, ErrorCode, EventInfo, EventType};

pub const INVALID_EVENT_MESSAGE: &str = "Event info not found or invalid.";
pub const PARTNER_MISMATCH_MESSAGE: &str = "Event partner mismatch.";

/// Accepts an event for dispatch, returning it with its type.
///
/// `expected_origin` is the endpoint derived from an event-callback URL, when
/// one was supplied; the event must then declare that same marketplace.
/// Rejections are returned as the failure result to report.
pub fn validate_event(
    event: Option<EventInfo>,
    expected_origin: Option<&str>,
) -> Result<(EventInfo, EventType), ApiResult> {
    let Some(event) = event else {
        return Err(ApiResult::failure(ErrorCode::UnknownError, INVALID_EVENT_MESSAGE));
    };
    let Some(event_type) = event.event_type.clone() else {
        return Err(ApiResult::failure(ErrorCode::UnknownError, INVALID_EVENT_MESSAGE));
    };

    if let Some(expected) = expected_origin {
        let declared_matches = event
            .marketplace_base_url()
            .is_some_and(|declared| same_origin(declared, expected));
        if !declared_matches {
            return Err(ApiResult::failure(
                ErrorCode::UnknownError,
                PARTNER_MISMATCH_MESSAGE,
            ));
        }
    }

    Ok((event, event_type))
}
