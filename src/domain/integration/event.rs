//! Event details as returned by the marketplace event API.
//!
//! Only the parts of the marketplace schema the dispatcher reads are modelled.
//! Every section is optional on the wire; handlers ask for the sections they
//! need through the `require_*` accessors, which report the first missing one.
//! A section whose identifier is blank counts as missing.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EventType;

/// A required payload section was absent from the fetched event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Event is missing required section: {section}")]
pub struct IncompleteEvent {
    pub section: &'static str,
}

impl IncompleteEvent {
    pub fn new(section: &'static str) -> Self {
        Self { section }
    }
}

/// Full details of a marketplace notification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    #[serde(rename = "type", default)]
    pub event_type: Option<EventType>,

    /// Marketplace that emitted the event.
    #[serde(default)]
    pub marketplace: Option<MarketplaceInfo>,

    /// User who triggered the event.
    #[serde(default)]
    pub creator: Option<UserInfo>,

    #[serde(default)]
    pub payload: Option<Payload>,

    /// `STATELESS` or `DEVELOPMENT` for test events.
    #[serde(default)]
    pub flag: Option<String>,

    #[serde(default)]
    pub return_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceInfo {
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub partner: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    #[serde(default)]
    pub company: Option<CompanyInfo>,
    #[serde(default)]
    pub account: Option<AccountInfo>,
    #[serde(default)]
    pub user: Option<UserInfo>,
    #[serde(default)]
    pub order: Option<OrderInfo>,
    #[serde(default)]
    pub addon_instance: Option<AddonInstanceInfo>,
    #[serde(default)]
    pub notice: Option<NoticeInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub open_id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    /// Free-form attributes configured on the marketplace listing.
    #[serde(default)]
    pub attributes: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountInfo {
    #[serde(default)]
    pub account_identifier: String,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    #[serde(default)]
    pub edition_code: Option<String>,
    #[serde(default)]
    pub addon_offering_code: Option<String>,
    #[serde(default)]
    pub pricing_duration: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

impl OrderInfo {
    /// Seat count: the summed quantity of `USER` items, if any are present.
    pub fn max_users(&self) -> Option<u32> {
        self.items
            .iter()
            .filter(|item| item.unit.eq_ignore_ascii_case("USER"))
            .map(|item| item.quantity)
            .reduce(|total, quantity| total.saturating_add(quantity))
    }

    /// Quantity of the first ordered item.
    pub fn first_quantity(&self) -> Option<u32> {
        self.items.first().map(|item| item.quantity)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub unit: String,
    #[serde(default)]
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonInstanceInfo {
    #[serde(default)]
    pub id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoticeInfo {
    #[serde(rename = "type", default)]
    pub notice_type: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl EventInfo {
    /// Base URL the marketplace claims to have sent this event from.
    pub fn marketplace_base_url(&self) -> Option<&str> {
        self.marketplace.as_ref()?.base_url.as_deref()
    }

    pub fn require_creator(&self) -> Result<&UserInfo, IncompleteEvent> {
        let creator = self.creator.as_ref().ok_or(IncompleteEvent::new("creator"))?;
        identified(creator, &creator.open_id, "creator.openId")
    }

    fn require_payload(&self) -> Result<&Payload, IncompleteEvent> {
        self.payload
            .as_ref()
            .ok_or(IncompleteEvent::new("payload"))
    }

    pub fn require_company(&self) -> Result<&CompanyInfo, IncompleteEvent> {
        let company = self
            .require_payload()?
            .company
            .as_ref()
            .ok_or(IncompleteEvent::new("payload.company"))?;
        identified(company, &company.uuid, "payload.company.uuid")
    }

    pub fn require_account(&self) -> Result<&AccountInfo, IncompleteEvent> {
        let account = self
            .require_payload()?
            .account
            .as_ref()
            .ok_or(IncompleteEvent::new("payload.account"))?;
        identified(
            account,
            &account.account_identifier,
            "payload.account.accountIdentifier",
        )
    }

    pub fn require_user(&self) -> Result<&UserInfo, IncompleteEvent> {
        let user = self
            .require_payload()?
            .user
            .as_ref()
            .ok_or(IncompleteEvent::new("payload.user"))?;
        identified(user, &user.open_id, "payload.user.openId")
    }

    pub fn require_order(&self) -> Result<&OrderInfo, IncompleteEvent> {
        self.require_payload()?
            .order
            .as_ref()
            .ok_or(IncompleteEvent::new("payload.order"))
    }

    pub fn require_addon_instance(&self) -> Result<&AddonInstanceInfo, IncompleteEvent> {
        let instance = self
            .require_payload()?
            .addon_instance
            .as_ref()
            .ok_or(IncompleteEvent::new("payload.addonInstance"))?;
        identified(instance, &instance.id, "payload.addonInstance.id")
    }
}

fn identified<'a, T>(
    section: &'a T,
    identifier: &str,
    field: &'static str,
) -> Result<&'a T, IncompleteEvent> {
    if identifier.trim().is_empty() {
        return Err(IncompleteEvent::new(field));
    }
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order_event_json() -> serde_json::Value {
        json!({
            "type": "SUBSCRIPTION_ORDER",
            "marketplace": { "baseUrl": "https://marketplace.example.com", "partner": "ACME" },
            "flag": "STATELESS",
            "creator": {
                "uuid": "c0ffee",
                "openId": "https://marketplace.example.com/openid/id/c0ffee",
                "email": "admin@example.com",
                "firstName": "Ada",
                "lastName": "Admin",
                "language": "en"
            },
            "payload": {
                "company": { "uuid": "company-1", "name": "Example Co" },
                "order": {
                    "editionCode": "PREMIUM",
                    "pricingDuration": "MONTHLY",
                    "items": [
                        { "unit": "USER", "quantity": 10 },
                        { "unit": "MEGABYTE", "quantity": 15 }
                    ]
                }
            }
        })
    }

    #[test]
    fn deserializes_subscription_order() {
        let event: EventInfo = serde_json::from_value(order_event_json()).unwrap();

        assert_eq!(event.event_type, Some(EventType::SubscriptionOrder));
        assert_eq!(
            event.marketplace_base_url(),
            Some("https://marketplace.example.com")
        );
        assert_eq!(event.require_creator().unwrap().first_name.as_deref(), Some("Ada"));
        assert_eq!(event.require_company().unwrap().uuid, "company-1");

        let order = event.require_order().unwrap();
        assert_eq!(order.edition_code.as_deref(), Some("PREMIUM"));
        assert_eq!(order.max_users(), Some(10));
        assert_eq!(order.first_quantity(), Some(10));
    }

    #[test]
    fn null_type_deserializes_as_none() {
        let event: EventInfo = serde_json::from_value(json!({ "type": null })).unwrap();
        assert_eq!(event.event_type, None);
    }

    #[test]
    fn missing_sections_are_reported_by_name() {
        let event: EventInfo =
            serde_json::from_value(json!({ "type": "SUBSCRIPTION_CHANGE", "payload": {} }))
                .unwrap();

        assert_eq!(
            event.require_account().unwrap_err(),
            IncompleteEvent::new("payload.account")
        );
        assert_eq!(
            EventInfo::default().require_order().unwrap_err(),
            IncompleteEvent::new("payload")
        );
    }

    #[test]
    fn blank_identifiers_count_as_missing() {
        let event: EventInfo = serde_json::from_value(json!({
            "type": "SUBSCRIPTION_ORDER",
            "creator": { "openId": " " },
            "payload": {
                "company": { "name": "No Uuid Co" },
                "account": { "accountIdentifier": "" },
                "user": {},
                "addonInstance": { "id": "" }
            }
        }))
        .unwrap();

        assert_eq!(
            event.require_creator().unwrap_err(),
            IncompleteEvent::new("creator.openId")
        );
        assert_eq!(
            event.require_company().unwrap_err(),
            IncompleteEvent::new("payload.company.uuid")
        );
        assert_eq!(
            event.require_account().unwrap_err(),
            IncompleteEvent::new("payload.account.accountIdentifier")
        );
        assert_eq!(
            event.require_user().unwrap_err(),
            IncompleteEvent::new("payload.user.openId")
        );
        assert_eq!(
            event.require_addon_instance().unwrap_err(),
            IncompleteEvent::new("payload.addonInstance.id")
        );
    }

    #[test]
    fn user_attributes_are_collected() {
        let user: UserInfo = serde_json::from_value(json!({
            "openId": "open-1",
            "attributes": { "zipCode": "02110", "appAdmin": "true" }
        }))
        .unwrap();

        assert_eq!(user.attributes.get("zipCode").map(String::as_str), Some("02110"));
        assert_eq!(user.attributes.len(), 2);
    }

    #[test]
    fn max_users_absent_without_user_items() {
        let order = OrderInfo {
            items: vec![OrderItem {
                unit: "MEGABYTE".to_string(),
                quantity: 100,
            }],
            ..Default::default()
        };
        assert_eq!(order.max_users(), None);
        assert_eq!(OrderInfo::default().first_quantity(), None);
    }

    #[test]
    fn max_users_sums_user_items() {
        let order = OrderInfo {
            items: vec![
                OrderItem { unit: "USER".to_string(), quantity: 5 },
                OrderItem { unit: "USER".to_string(), quantity: 3 },
            ],
            ..Default::default()
        };
        assert_eq!(order.max_users(), Some(8));
    }
}
