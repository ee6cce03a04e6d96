//! Marketplace event types.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle notification kinds sent by the marketplace.
///
/// Wire values are SCREAMING_SNAKE_CASE. Values this endpoint does not handle
/// (for example `USER_UPDATED` or `ADDON_BIND`) are kept verbatim in
/// [`EventType::Unknown`] so they can be reported back.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// A company purchased the product.
    SubscriptionOrder,

    /// Edition or seat count changed.
    SubscriptionChange,

    /// Subscription was cancelled.
    SubscriptionCancel,

    /// Informational notice (deactivation, reactivation, closure).
    SubscriptionNotice,

    /// A user was given access to the product.
    UserAssignment,

    /// A user's access was revoked.
    UserUnassignment,

    /// An addon was purchased for an existing account.
    AddonOrder,

    /// An addon's quantity or offering changed.
    AddonChange,

    /// An addon was cancelled.
    AddonCancel,

    /// Unsupported event type.
    Unknown(String),
}

impl EventType {
    pub fn as_str(&self) -> &str {
        match self {
            EventType::SubscriptionOrder => "SUBSCRIPTION_ORDER",
            EventType::SubscriptionChange => "SUBSCRIPTION_CHANGE",
            EventType::SubscriptionCancel => "SUBSCRIPTION_CANCEL",
            EventType::SubscriptionNotice => "SUBSCRIPTION_NOTICE",
            EventType::UserAssignment => "USER_ASSIGNMENT",
            EventType::UserUnassignment => "USER_UNASSIGNMENT",
            EventType::AddonOrder => "ADDON_ORDER",
            EventType::AddonChange => "ADDON_CHANGE",
            EventType::AddonCancel => "ADDON_CANCEL",
            EventType::Unknown(raw) => raw,
        }
    }

    /// Returns true for every type this endpoint dispatches.
    pub fn is_supported(&self) -> bool {
        !matches!(self, EventType::Unknown(_))
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUBSCRIPTION_ORDER" => EventType::SubscriptionOrder,
            "SUBSCRIPTION_CHANGE" => EventType::SubscriptionChange,
            "SUBSCRIPTION_CANCEL" => EventType::SubscriptionCancel,
            "SUBSCRIPTION_NOTICE" => EventType::SubscriptionNotice,
            "USER_ASSIGNMENT" => EventType::UserAssignment,
            "USER_UNASSIGNMENT" => EventType::UserUnassignment,
            "ADDON_ORDER" => EventType::AddonOrder,
            "ADDON_CHANGE" => EventType::AddonChange,
            "ADDON_CANCEL" => EventType::AddonCancel,
            _ => EventType::Unknown(value),
        }
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        EventType::from(value.to_string())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Unknown(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
