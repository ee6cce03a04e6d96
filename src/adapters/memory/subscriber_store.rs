//! In-memory subscriber store.
//!
//! Used when no database is configured, and by tests. A transaction holds the
//! store lock for its whole lifetime and edits a private copy of the state;
//! `commit` swaps the copy in, dropping the transaction throws it away.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::foundation::Timestamp;
use crate::domain::integration::{AccountBean, AddonBean, UserBean};
use crate::domain::subscriber::{Account, Addon, User};
use crate::ports::{EntityKind, StoreError, SubscriberStore, SubscriberTransaction};

#[derive(Debug, Clone, Default)]
struct SubscriberState {
    accounts: HashMap<String, Account>,
    /// Keyed by OpenID.
    users: HashMap<String, User>,
    addons: HashMap<String, Addon>,
}

/// Process-local subscriber store.
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriberStore {
    state: Arc<Mutex<SubscriberState>>,
}

impl InMemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn account(&self, uuid: &str) -> Option<Account> {
        self.state.lock().await.accounts.get(uuid).cloned()
    }

    pub async fn user(&self, open_id: &str) -> Option<User> {
        self.state.lock().await.users.get(open_id).cloned()
    }

    pub async fn addon(&self, addon_identifier: &str) -> Option<Addon> {
        self.state.lock().await.addons.get(addon_identifier).cloned()
    }

    pub async fn account_count(&self) -> usize {
        self.state.lock().await.accounts.len()
    }

    /// Users of an account, ordered by OpenID.
    pub async fn users_of(&self, account_uuid: &str) -> Vec<User> {
        let state = self.state.lock().await;
        let mut users: Vec<User> = state
            .users
            .values()
            .filter(|user| user.belongs_to(account_uuid))
            .cloned()
            .collect();
        users.sort_by(|a, b| a.open_id.cmp(&b.open_id));
        users
    }

    /// Addons of an account, ordered by identifier.
    pub async fn addons_of(&self, account_uuid: &str) -> Vec<Addon> {
        let state = self.state.lock().await;
        let mut addons: Vec<Addon> = state
            .addons
            .values()
            .filter(|addon| addon.account_uuid == account_uuid)
            .cloned()
            .collect();
        addons.sort_by(|a, b| a.addon_identifier.cmp(&b.addon_identifier));
        addons
    }
}

#[async_trait]
impl SubscriberStore for InMemorySubscriberStore {
    async fn begin(&self) -> Result<Box<dyn SubscriberTransaction>, StoreError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let working = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, working }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<SubscriberState>,
    working: SubscriberState,
}

impl InMemoryTransaction {
    fn ensure_account(&self, account_uuid: &str) -> Result<(), StoreError> {
        if self.working.accounts.contains_key(account_uuid) {
            Ok(())
        } else {
            Err(StoreError::not_found(EntityKind::Account, account_uuid))
        }
    }
}

#[async_trait]
impl SubscriberTransaction for InMemoryTransaction {
    async fn find_user_by_open_id(&mut self, open_id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.working.users.get(open_id).cloned())
    }

    async fn create_account(
        &mut self,
        account: &AccountBean,
        admin: &UserBean,
    ) -> Result<(), StoreError> {
        if self.working.accounts.contains_key(&account.uuid) {
            return Err(StoreError::conflict(EntityKind::Account, &account.uuid));
        }
        if self.working.users.contains_key(&admin.open_id) {
            return Err(StoreError::conflict(EntityKind::User, &admin.open_id));
        }

        self.working.accounts.insert(
            account.uuid.clone(),
            Account::from_bean(account, Timestamp::now()),
        );
        self.working
            .users
            .insert(admin.open_id.clone(), User::from_bean(admin, &account.uuid));
        Ok(())
    }

    async fn update_account(&mut self, account: &AccountBean) -> Result<(), StoreError> {
        let existing = self
            .working
            .accounts
            .get_mut(&account.uuid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Account, &account.uuid))?;
        existing.apply(account, Timestamp::now());
        Ok(())
    }

    async fn delete_account(&mut self, account_uuid: &str) -> Result<(), StoreError> {
        self.working
            .accounts
            .remove(account_uuid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Account, account_uuid))?;
        self.working.users.retain(|_, user| !user.belongs_to(account_uuid));
        self.working
            .addons
            .retain(|_, addon| addon.account_uuid != account_uuid);
        Ok(())
    }

    async fn create_user(&mut self, user: &UserBean, account_uuid: &str) -> Result<(), StoreError> {
        self.ensure_account(account_uuid)?;
        if self.working.users.contains_key(&user.open_id) {
            return Err(StoreError::conflict(EntityKind::User, &user.open_id));
        }
        self.working
            .users
            .insert(user.open_id.clone(), User::from_bean(user, account_uuid));
        Ok(())
    }

    async fn delete_user(&mut self, open_id: &str) -> Result<(), StoreError> {
        self.working
            .users
            .remove(open_id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(EntityKind::User, open_id))
    }

    async fn create_addon(
        &mut self,
        addon: &AddonBean,
        account_uuid: &str,
    ) -> Result<(), StoreError> {
        self.ensure_account(account_uuid)?;
        if self.working.addons.contains_key(&addon.addon_identifier) {
            return Err(StoreError::conflict(
                EntityKind::Addon,
                &addon.addon_identifier,
            ));
        }
        self.working.addons.insert(
            addon.addon_identifier.clone(),
            Addon::from_bean(addon, account_uuid),
        );
        Ok(())
    }

    async fn update_addon(
        &mut self,
        addon: &AddonBean,
        account_uuid: &str,
    ) -> Result<(), StoreError> {
        self.ensure_account(account_uuid)?;
        let existing = self
            .working
            .addons
            .get_mut(&addon.addon_identifier)
            .filter(|existing| existing.account_uuid == account_uuid)
            .ok_or_else(|| StoreError::not_found(EntityKind::Addon, &addon.addon_identifier))?;
        existing.apply(addon);
        Ok(())
    }

    async fn delete_addon(&mut self, addon_identifier: &str) -> Result<(), StoreError> {
        self.working
            .addons
            .remove(addon_identifier)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(EntityKind::Addon, addon_identifier))
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        let InMemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(open_id: &str) -> UserBean {
        UserBean {
            open_id: open_id.to_string(),
            admin: true,
            ..Default::default()
        }
    }

    async fn store_with_account(uuid: &str, admin_open_id: &str) -> InMemorySubscriberStore {
        let store = InMemorySubscriberStore::new();
        let mut tx = store.begin().await.unwrap();
        tx.create_account(&AccountBean::new(uuid), &admin(admin_open_id))
            .await
            .unwrap();
        tx.commit().await.unwrap();
        store
    }

    #[tokio::test]
    async fn committed_changes_are_visible() {
        let store = store_with_account("acct-1", "admin-1").await;

        assert!(store.account("acct-1").await.is_some());
        let admin = store.user("admin-1").await.unwrap();
        assert!(admin.admin);
        assert_eq!(admin.account_uuid, "acct-1");
    }

    #[tokio::test]
    async fn dropped_transaction_discards_changes() {
        let store = InMemorySubscriberStore::new();
        {
            let mut tx = store.begin().await.unwrap();
            tx.create_account(&AccountBean::new("acct-1"), &admin("admin-1"))
                .await
                .unwrap();
        }
        assert_eq!(store.account_count().await, 0);
        assert!(store.user("admin-1").await.is_none());
    }

    #[tokio::test]
    async fn create_account_rejects_taken_admin_open_id() {
        let store = store_with_account("acct-1", "admin-1").await;
        let mut tx = store.begin().await.unwrap();

        let err = tx
            .create_account(&AccountBean::new("acct-2"), &admin("admin-1"))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::conflict(EntityKind::User, "admin-1"));
    }

    #[tokio::test]
    async fn delete_account_cascades() {
        let store = store_with_account("acct-1", "admin-1").await;
        let mut tx = store.begin().await.unwrap();
        tx.create_addon(
            &AddonBean {
                addon_identifier: "addon-1".to_string(),
                ..Default::default()
            },
            "acct-1",
        )
        .await
        .unwrap();
        tx.delete_account("acct-1").await.unwrap();
        tx.commit().await.unwrap();

        assert!(store.account("acct-1").await.is_none());
        assert!(store.user("admin-1").await.is_none());
        assert!(store.addon("addon-1").await.is_none());
    }

    #[tokio::test]
    async fn missing_records_report_not_found() {
        let store = InMemorySubscriberStore::new();
        let mut tx = store.begin().await.unwrap();

        assert_eq!(
            tx.update_account(&AccountBean::new("ghost")).await.unwrap_err(),
            StoreError::not_found(EntityKind::Account, "ghost")
        );
        assert_eq!(
            tx.delete_user("ghost-user").await.unwrap_err(),
            StoreError::not_found(EntityKind::User, "ghost-user")
        );
        assert_eq!(
            tx.delete_addon("ghost-addon").await.unwrap_err(),
            StoreError::not_found(EntityKind::Addon, "ghost-addon")
        );
        assert_eq!(
            tx.create_user(&admin("someone"), "ghost").await.unwrap_err(),
            StoreError::not_found(EntityKind::Account, "ghost")
        );
    }

    #[tokio::test]
    async fn update_addon_requires_owning_account() {
        let store = store_with_account("acct-1", "admin-1").await;
        let mut tx = store.begin().await.unwrap();
        tx.create_account(&AccountBean::new("acct-2"), &admin("admin-2"))
            .await
            .unwrap();
        tx.create_addon(
            &AddonBean {
                addon_identifier: "addon-1".to_string(),
                quantity: Some(1),
                ..Default::default()
            },
            "acct-1",
        )
        .await
        .unwrap();

        let change = AddonBean {
            addon_identifier: "addon-1".to_string(),
            quantity: Some(4),
            ..Default::default()
        };
        assert_eq!(
            tx.update_addon(&change, "acct-2").await.unwrap_err(),
            StoreError::not_found(EntityKind::Addon, "addon-1")
        );
        tx.update_addon(&change, "acct-1").await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.addon("addon-1").await.unwrap().quantity, Some(4));
        assert_eq!(store.addons_of("acct-1").await.len(), 1);
        assert!(store.addons_of("acct-2").await.is_empty());
    }
}
