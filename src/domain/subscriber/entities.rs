//! Persisted subscriber records.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;
use crate::domain::integration::{AccountBean, AddonBean, UserBean};

/// A subscribing company (tenant).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub uuid: String,
    pub edition_code: Option<String>,
    pub max_users: Option<u32>,
    pub marketplace_base_url: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    pub fn from_bean(bean: &AccountBean, now: Timestamp) -> Self {
        Self {
            uuid: bean.uuid.clone(),
            edition_code: bean.edition_code.clone(),
            max_users: bean.max_users,
            marketplace_base_url: bean.marketplace_base_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a subscription change. Fields the event leaves out keep their
    /// current values.
    pub fn apply(&mut self, bean: &AccountBean, now: Timestamp) {
        if let Some(edition_code) = &bean.edition_code {
            self.edition_code = Some(edition_code.clone());
        }
        if let Some(max_users) = bean.max_users {
            self.max_users = Some(max_users);
        }
        if let Some(base_url) = &bean.marketplace_base_url {
            self.marketplace_base_url = Some(base_url.clone());
        }
        self.updated_at = now;
    }
}

/// A user with access to an account, keyed by OpenID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub uuid: Option<String>,
    pub open_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub department: Option<String>,
    pub timezone: Option<String>,
    pub admin: bool,
    pub account_uuid: String,
}

impl User {
    pub fn from_bean(bean: &UserBean, account_uuid: &str) -> Self {
        Self {
            uuid: bean.uuid.clone(),
            open_id: bean.open_id.clone(),
            email: bean.email.clone(),
            first_name: bean.first_name.clone(),
            last_name: bean.last_name.clone(),
            zip_code: bean.zip_code.clone(),
            department: bean.department.clone(),
            timezone: bean.timezone.clone(),
            admin: bean.admin,
            account_uuid: account_uuid.to_string(),
        }
    }

    pub fn belongs_to(&self, account_uuid: &str) -> bool {
        self.account_uuid == account_uuid
    }
}

/// A purchased addon attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    pub addon_identifier: String,
    pub code: Option<String>,
    pub quantity: Option<u32>,
    pub account_uuid: String,
}

impl Addon {
    pub fn from_bean(bean: &AddonBean, account_uuid: &str) -> Self {
        Self {
            addon_identifier: bean.addon_identifier.clone(),
            code: bean.code.clone(),
            quantity: bean.quantity,
            account_uuid: account_uuid.to_string(),
        }
    }

    pub fn apply(&mut self, bean: &AddonBean) {
        if let Some(code) = &bean.code {
            self.code = Some(code.clone());
        }
        if let Some(quantity) = bean.quantity {
            self.quantity = Some(quantity);
        }
    }
}
