//! Transfer objects handed to the subscriber store.
//!
//! These carry what an event says about an account, user or addon. The store
//! maps them onto its persisted entities.

use uuid::Uuid;

use crate::domain::foundation::Timestamp;

use super::UserInfo;

const ZIP_CODE_KEY: &str = "zipCode";
const DEPARTMENT_KEY: &str = "department";
const TIMEZONE_KEY: &str = "timezone";
const APP_ADMIN_KEY: &str = "appAdmin";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountBean {
    pub uuid: String,
    pub edition_code: Option<String>,
    pub max_users: Option<u32>,
    /// Marketplace the account was purchased through.
    pub marketplace_base_url: Option<String>,
}

impl AccountBean {
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            uuid: uuid.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserBean {
    pub uuid: Option<String>,
    pub open_id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub zip_code: Option<String>,
    pub department: Option<String>,
    pub timezone: Option<String>,
    pub admin: bool,
}

impl UserBean {
    /// Identity and name fields only; attributes are ignored.
    pub fn from_identity(info: &UserInfo) -> Self {
        Self {
            uuid: info.uuid.clone(),
            open_id: info.open_id.clone(),
            email: info.email.clone(),
            first_name: info.first_name.clone(),
            last_name: info.last_name.clone(),
            ..Default::default()
        }
    }

    /// Identity plus the listing attributes (`zipCode`, `department`,
    /// `timezone`, `appAdmin`).
    pub fn from_assignment(info: &UserInfo) -> Self {
        let attribute = |key: &str| info.attributes.get(key).cloned();
        Self {
            zip_code: attribute(ZIP_CODE_KEY),
            department: attribute(DEPARTMENT_KEY),
            timezone: attribute(TIMEZONE_KEY),
            admin: info
                .attributes
                .get(APP_ADMIN_KEY)
                .is_some_and(|value| value.trim().eq_ignore_ascii_case("true")),
            ..Self::from_identity(info)
        }
    }

    /// Label used in result messages.
    pub fn display_id(&self) -> &str {
        self.uuid.as_deref().unwrap_or(&self.open_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonBean {
    pub addon_identifier: String,
    pub code: Option<String>,
    pub quantity: Option<u32>,
}

impl AddonBean {
    /// Identifier for a newly ordered addon.
    ///
    /// Combines account, offering code and order time with a random suffix so
    /// two orders placed in the same millisecond still get distinct ids.
    pub fn generate_identifier(account_uuid: &str, code: &str, ordered_at: Timestamp) -> String {
        let nonce = Uuid::new_v4().simple().to_string();
        format!(
            "{}-{}-{}-{}",
            account_uuid,
            code,
            ordered_at.as_unix_millis(),
            &nonce[..8]
        )
    }
}
