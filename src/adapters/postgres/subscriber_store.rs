//! PostgreSQL implementation of the SubscriberStore port.
//!
//! Each dispatch runs in one database transaction. Dropping a
//! `PostgresSubscriberTransaction` without committing rolls it back.

use async_trait::async_trait;
use sqlx::postgres::PgQueryResult;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::foundation::Timestamp;
use crate::domain::integration::{AccountBean, AddonBean, UserBean};
use crate::domain::subscriber::User;
use crate::ports::{EntityKind, StoreError, SubscriberStore, SubscriberTransaction};

const ACCOUNTS_PKEY: &str = "accounts_pkey";
const USERS_PKEY: &str = "users_pkey";
const ADDONS_PKEY: &str = "addons_pkey";
const USERS_ACCOUNT_FKEY: &str = "users_account_uuid_fkey";
const ADDONS_ACCOUNT_FKEY: &str = "addons_account_uuid_fkey";

/// PostgreSQL-backed subscriber store.
#[derive(Clone)]
pub struct PostgresSubscriberStore {
    pool: PgPool,
}

impl PostgresSubscriberStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Applies the bundled schema migrations.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::storage(format!("Failed to run migrations: {}", e)))
    }
}

#[async_trait]
impl SubscriberStore for PostgresSubscriberStore {
    async fn begin(&self) -> Result<Box<dyn SubscriberTransaction>, StoreError> {
        let tx = self
            .pool
            .begin()
            .await
            .map_err(|e| StoreError::storage(format!("Failed to begin transaction: {}", e)))?;
        Ok(Box::new(PostgresSubscriberTransaction { tx }))
    }
}

/// One open database transaction.
pub struct PostgresSubscriberTransaction {
    tx: Transaction<'static, Postgres>,
}

/// Database row representation of a user.
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    open_id: String,
    uuid: Option<String>,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    zip_code: Option<String>,
    department: Option<String>,
    timezone: Option<String>,
    admin: bool,
    account_uuid: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            uuid: row.uuid,
            open_id: row.open_id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            zip_code: row.zip_code,
            department: row.department,
            timezone: row.timezone,
            admin: row.admin,
            account_uuid: row.account_uuid,
        }
    }
}

/// Seat and item counts are stored as INTEGER.
fn to_db_count(count: Option<u32>) -> Option<i32> {
    count.map(|count| i32::try_from(count).unwrap_or(i32::MAX))
}

/// Maps a constraint violation to the store error it stands for.
fn classify(err: sqlx::Error, context: &str, account_uuid: &str, id: &str) -> StoreError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.constraint() {
            Some(ACCOUNTS_PKEY) => return StoreError::conflict(EntityKind::Account, account_uuid),
            Some(USERS_PKEY) => return StoreError::conflict(EntityKind::User, id),
            Some(ADDONS_PKEY) => return StoreError::conflict(EntityKind::Addon, id),
            Some(USERS_ACCOUNT_FKEY) | Some(ADDONS_ACCOUNT_FKEY) => {
                return StoreError::not_found(EntityKind::Account, account_uuid)
            }
            _ => {}
        }
    }
    StoreError::storage(format!("{}: {}", context, err))
}

fn require_affected(
    result: PgQueryResult,
    entity: EntityKind,
    id: &str,
) -> Result<(), StoreError> {
    if result.rows_affected() == 0 {
        return Err(StoreError::not_found(entity, id));
    }
    Ok(())
}

/// An `ON CONFLICT DO NOTHING` insert that wrote no row lost to an existing
/// key. The transaction stays usable, unlike after a unique violation.
fn require_inserted(
    result: PgQueryResult,
    entity: EntityKind,
    id: &str,
) -> Result<(), StoreError> {
    if result.rows_affected() == 0 {
        return Err(StoreError::conflict(entity, id));
    }
    Ok(())
}

#[async_trait]
impl SubscriberTransaction for PostgresSubscriberTransaction {
    async fn find_user_by_open_id(&mut self, open_id: &str) -> Result<Option<User>, StoreError> {
        let row: Option<UserRow> = sqlx::query_as(
            r#"
            SELECT open_id, uuid, email, first_name, last_name, zip_code,
                   department, timezone, admin, account_uuid
            FROM users
            WHERE open_id = $1
            "#,
        )
        .bind(open_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(|e| StoreError::storage(format!("Failed to find user: {}", e)))?;

        Ok(row.map(User::from))
    }

    async fn create_account(
        &mut self,
        account: &AccountBean,
        admin: &UserBean,
    ) -> Result<(), StoreError> {
        let now = Timestamp::now();
        tracing::debug!(account = %account.uuid, "Inserting account");

        sqlx::query(
            r#"
            INSERT INTO accounts (uuid, edition_code, max_users, marketplace_base_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(&account.uuid)
        .bind(&account.edition_code)
        .bind(to_db_count(account.max_users))
        .bind(&account.marketplace_base_url)
        .bind(now.as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| classify(e, "Failed to create account", &account.uuid, &account.uuid))?;

        self.create_user(admin, &account.uuid).await
    }

    async fn update_account(&mut self, account: &AccountBean) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts SET
                edition_code = COALESCE($2, edition_code),
                max_users = COALESCE($3, max_users),
                marketplace_base_url = COALESCE($4, marketplace_base_url),
                updated_at = $5
            WHERE uuid = $1
            "#,
        )
        .bind(&account.uuid)
        .bind(&account.edition_code)
        .bind(to_db_count(account.max_users))
        .bind(&account.marketplace_base_url)
        .bind(Timestamp::now().as_datetime())
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::storage(format!("Failed to update account: {}", e)))?;

        require_affected(result, EntityKind::Account, &account.uuid)
    }

    async fn delete_account(&mut self, account_uuid: &str) -> Result<(), StoreError> {
        // Users and addons go with it (ON DELETE CASCADE)
        let result = sqlx::query("DELETE FROM accounts WHERE uuid = $1")
            .bind(account_uuid)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| StoreError::storage(format!("Failed to delete account: {}", e)))?;

        require_affected(result, EntityKind::Account, account_uuid)
    }

    async fn create_user(&mut self, user: &UserBean, account_uuid: &str) -> Result<(), StoreError> {
        tracing::debug!(account = %account_uuid, user = %user.open_id, "Inserting user");

        let result = sqlx::query(
            r#"
            INSERT INTO users (
                open_id, uuid, email, first_name, last_name, zip_code,
                department, timezone, admin, account_uuid
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (open_id) DO NOTHING
            "#,
        )
        .bind(&user.open_id)
        .bind(&user.uuid)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.zip_code)
        .bind(&user.department)
        .bind(&user.timezone)
        .bind(user.admin)
        .bind(account_uuid)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| classify(e, "Failed to create user", account_uuid, &user.open_id))?;

        require_inserted(result, EntityKind::User, &user.open_id)
    }

    async fn delete_user(&mut self, open_id: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM users WHERE open_id = $1")
            .bind(open_id)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| StoreError::storage(format!("Failed to delete user: {}", e)))?;

        require_affected(result, EntityKind::User, open_id)
    }

    async fn create_addon(
        &mut self,
        addon: &AddonBean,
        account_uuid: &str,
    ) -> Result<(), StoreError> {
        tracing::debug!(account = %account_uuid, addon = %addon.addon_identifier, "Inserting addon");

        sqlx::query(
            r#"
            INSERT INTO addons (addon_identifier, code, quantity, account_uuid)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&addon.addon_identifier)
        .bind(&addon.code)
        .bind(to_db_count(addon.quantity))
        .bind(account_uuid)
        .execute(&mut *self.tx)
        .await
        .map_err(|e| {
            classify(e, "Failed to create addon", account_uuid, &addon.addon_identifier)
        })?;

        Ok(())
    }

    async fn update_addon(
        &mut self,
        addon: &AddonBean,
        account_uuid: &str,
    ) -> Result<(), StoreError> {
        let account_exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE uuid = $1)")
                .bind(account_uuid)
                .fetch_one(&mut *self.tx)
                .await
                .map_err(|e| StoreError::storage(format!("Failed to find account: {}", e)))?;
        if !account_exists {
            return Err(StoreError::not_found(EntityKind::Account, account_uuid));
        }

        let result = sqlx::query(
            r#"
            UPDATE addons SET
                code = COALESCE($3, code),
                quantity = COALESCE($4, quantity)
            WHERE addon_identifier = $1 AND account_uuid = $2
            "#,
        )
        .bind(&addon.addon_identifier)
        .bind(account_uuid)
        .bind(&addon.code)
        .bind(to_db_count(addon.quantity))
        .execute(&mut *self.tx)
        .await
        .map_err(|e| StoreError::storage(format!("Failed to update addon: {}", e)))?;

        require_affected(result, EntityKind::Addon, &addon.addon_identifier)
    }

    async fn delete_addon(&mut self, addon_identifier: &str) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM addons WHERE addon_identifier = $1")
            .bind(addon_identifier)
            .execute(&mut *self.tx)
            .await
            .map_err(|e| StoreError::storage(format!("Failed to delete addon: {}", e)))?;

        require_affected(result, EntityKind::Addon, addon_identifier)
    }

    async fn commit(self: Box<Self>) -> Result<(), StoreError> {
        self.tx
            .commit()
            .await
            .map_err(|e| StoreError::storage(format!("Failed to commit transaction: {}", e)))
    }
}
