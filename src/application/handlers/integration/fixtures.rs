//! Shared builders for dispatcher tests.

use crate::adapters::memory::InMemorySubscriberStore;
use crate::domain::integration::{
    AccountBean, AccountInfo, AddonBean, AddonInstanceInfo, CompanyInfo, EventInfo, EventType,
    MarketplaceInfo, OrderInfo, OrderItem, Payload, UserBean, UserInfo,
};
use crate::ports::{SubscriberStore, SubscriberTransaction};

pub const MARKETPLACE: &str = "https://marketplace.example.com";

pub fn user_info(open_id: &str) -> UserInfo {
    UserInfo {
        uuid: Some(format!("uuid-{}", open_id)),
        open_id: open_id.to_string(),
        email: Some(format!("{}@example.com", open_id)),
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        ..Default::default()
    }
}

pub fn account_info(account_uuid: &str) -> AccountInfo {
    AccountInfo {
        account_identifier: account_uuid.to_string(),
        status: Some("ACTIVE".to_string()),
    }
}

pub fn company_info(uuid: &str) -> CompanyInfo {
    CompanyInfo {
        uuid: uuid.to_string(),
        name: Some("Example Co".to_string()),
        ..Default::default()
    }
}

pub fn order(edition_code: &str, users: u32) -> OrderInfo {
    OrderInfo {
        edition_code: Some(edition_code.to_string()),
        items: vec![OrderItem {
            unit: "USER".to_string(),
            quantity: users,
        }],
        ..Default::default()
    }
}

pub fn addon_order_info(code: &str, quantity: Option<u32>) -> OrderInfo {
    OrderInfo {
        addon_offering_code: Some(code.to_string()),
        items: quantity
            .map(|quantity| {
                vec![OrderItem {
                    unit: "UNIT".to_string(),
                    quantity,
                }]
            })
            .unwrap_or_default(),
        ..Default::default()
    }
}

pub fn addon_instance(id: &str) -> AddonInstanceInfo {
    AddonInstanceInfo { id: id.to_string() }
}

/// An event of `event_type` from [`MARKETPLACE`], created by `creator-1`.
pub fn event(event_type: EventType, payload: Payload) -> EventInfo {
    EventInfo {
        event_type: Some(event_type),
        marketplace: Some(MarketplaceInfo {
            base_url: Some(MARKETPLACE.to_string()),
            partner: Some("ACME".to_string()),
        }),
        creator: Some(user_info("creator-1")),
        payload: Some(payload),
        ..Default::default()
    }
}

/// A store holding one account administered by `admin_open_id`.
pub async fn store_with_account(account_uuid: &str, admin_open_id: &str) -> InMemorySubscriberStore {
    let store = InMemorySubscriberStore::new();
    let mut tx = store.begin().await.unwrap();
    let admin = UserBean {
        admin: true,
        ..UserBean::from_identity(&user_info(admin_open_id))
    };
    tx.create_account(&AccountBean::new(account_uuid), &admin)
        .await
        .unwrap();
    tx.commit().await.unwrap();
    store
}

pub async fn add_addon(store: &InMemorySubscriberStore, account_uuid: &str, addon_identifier: &str) {
    let mut tx = store.begin().await.unwrap();
    let addon = AddonBean {
        addon_identifier: addon_identifier.to_string(),
        code: Some("STORAGE".to_string()),
        quantity: Some(1),
    };
    tx.create_addon(&addon, account_uuid).await.unwrap();
    tx.commit().await.unwrap();
}
