//! Subscriber store port (write side).
//!
//! Every event is applied inside one store transaction: [`SubscriberStore::begin`]
//! opens it, the handler runs its operations on the returned
//! [`SubscriberTransaction`], and the dispatcher commits once a result has been
//! produced. Dropping a transaction without committing discards its changes.
//!
//! # Errors
//!
//! Operations report a missing account, user or addon as
//! [`StoreError::NotFound`]; handlers turn those into failure results. Every
//! other error aborts the dispatch.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::integration::{AccountBean, AddonBean, UserBean};
use crate::domain::subscriber::User;

/// Kind of record a store error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Account,
    User,
    Addon,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EntityKind::Account => "Account",
            EntityKind::User => "User",
            EntityKind::Addon => "Addon",
        };
        f.write_str(s)
    }
}

/// Errors from subscriber store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("Could not find {entity} with identifier {id}")]
    NotFound { entity: EntityKind, id: String },

    #[error("{entity} with identifier {id} already exists")]
    Conflict { entity: EntityKind, id: String },

    #[error("Subscriber store failure: {0}")]
    Storage(String),
}

impl StoreError {
    pub fn not_found(entity: EntityKind, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(entity: EntityKind, id: impl Into<String>) -> Self {
        StoreError::Conflict {
            entity,
            id: id.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        StoreError::Storage(message.into())
    }
}

/// Entry point to the subscriber store.
#[async_trait]
pub trait SubscriberStore: Send + Sync {
    /// Opens a transaction covering one event dispatch.
    async fn begin(&self) -> Result<Box<dyn SubscriberTransaction>, StoreError>;
}

/// Operations available inside one store transaction.
#[async_trait]
pub trait SubscriberTransaction: Send {
    /// Looks up a user by OpenID across all accounts.
    async fn find_user_by_open_id(&mut self, open_id: &str) -> Result<Option<User>, StoreError>;

    /// Creates an account together with its first (administrator) user.
    ///
    /// # Errors
    ///
    /// - `Conflict(Account)` if the account already exists
    /// - `Conflict(User)` if the administrator's OpenID is taken
    async fn create_account(
        &mut self,
        account: &AccountBean,
        admin: &UserBean,
    ) -> Result<(), StoreError>;

    /// Updates edition, seat count and marketplace of an account.
    ///
    /// # Errors
    ///
    /// - `NotFound(Account)` if the account doesn't exist
    async fn update_account(&mut self, account: &AccountBean) -> Result<(), StoreError>;

    /// Deletes an account along with its users and addons.
    ///
    /// # Errors
    ///
    /// - `NotFound(Account)` if the account doesn't exist
    async fn delete_account(&mut self, account_uuid: &str) -> Result<(), StoreError>;

    /// Adds a user to an account.
    ///
    /// # Errors
    ///
    /// - `NotFound(Account)` if the account doesn't exist
    /// - `Conflict(User)` if the OpenID is taken
    async fn create_user(&mut self, user: &UserBean, account_uuid: &str) -> Result<(), StoreError>;

    /// Removes a user.
    ///
    /// # Errors
    ///
    /// - `NotFound(User)` if no user has this OpenID
    async fn delete_user(&mut self, open_id: &str) -> Result<(), StoreError>;

    /// Attaches a new addon to an account.
    ///
    /// # Errors
    ///
    /// - `NotFound(Account)` if the account doesn't exist
    async fn create_addon(&mut self, addon: &AddonBean, account_uuid: &str)
        -> Result<(), StoreError>;

    /// Updates code and quantity of an account's addon.
    ///
    /// # Errors
    ///
    /// - `NotFound(Account)` if the account doesn't exist
    /// - `NotFound(Addon)` if the account has no such addon
    async fn update_addon(&mut self, addon: &AddonBean, account_uuid: &str)
        -> Result<(), StoreError>;

    /// Deletes an addon.
    ///
    /// # Errors
    ///
    /// - `NotFound(Addon)` if the addon doesn't exist
    async fn delete_addon(&mut self, addon_identifier: &str) -> Result<(), StoreError>;

    /// Makes every change of this transaction durable.
    async fn commit(self: Box<Self>) -> Result<(), StoreError>;
}
