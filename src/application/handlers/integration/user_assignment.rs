//! User assignment and unassignment events.

use tracing::debug;

use crate::domain::integration::{ApiResult, ErrorCode, EventInfo, UserBean};
use crate::domain::subscriber::User;
use crate::ports::{EntityKind, StoreError, SubscriberTransaction};

use super::error::{failure_if_not_found, IntegrationError};

pub(super) const ALREADY_MAPPED_MESSAGE: &str =
    "A user with this OpenID already exists but was mapped correctly.";
pub(super) const USER_TAKEN_MESSAGE: &str = "A user with this OpenID or email already exists.";
pub(super) const WRONG_ACCOUNT_MESSAGE: &str = "User does not belong to the expected account.";

/// Gives a user access to an account.
///
/// Repeating an assignment is harmless: a user already in the account is
/// reported as success and not created twice.
pub(super) async fn user_assignment(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
) -> Result<ApiResult, IntegrationError> {
    let account_uuid = &event.require_account()?.account_identifier;
    let user = UserBean::from_assignment(event.require_user()?);

    if let Some(existing) = tx.find_user_by_open_id(&user.open_id).await? {
        return Ok(existing_user_result(&existing, account_uuid));
    }

    debug!(account = %account_uuid, user = %user.open_id, "Assigning user");
    match tx.create_user(&user, account_uuid).await {
        Ok(()) => Ok(ApiResult::success()
            .with_message(format!("Successfully created user: {}", user.display_id()))),
        // A concurrent delivery of the same assignment inserted the user first.
        Err(
            err @ StoreError::Conflict {
                entity: EntityKind::User,
                ..
            },
        ) => match tx.find_user_by_open_id(&user.open_id).await? {
            Some(existing) => Ok(existing_user_result(&existing, account_uuid)),
            None => Err(err.into()),
        },
        Err(err) => failure_if_not_found(err, ErrorCode::AccountNotFound),
    }
}

fn existing_user_result(existing: &User, account_uuid: &str) -> ApiResult {
    if existing.belongs_to(account_uuid) {
        ApiResult::success().with_message(ALREADY_MAPPED_MESSAGE)
    } else {
        ApiResult::failure(ErrorCode::UserAlreadyExists, USER_TAKEN_MESSAGE)
    }
}

/// Removes a user from an account.
pub(super) async fn user_unassignment(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
) -> Result<ApiResult, IntegrationError> {
    let account_uuid = &event.require_account()?.account_identifier;
    let open_id = &event.require_user()?.open_id;

    let Some(existing) = tx.find_user_by_open_id(open_id).await? else {
        return failure_if_not_found(
            StoreError::not_found(EntityKind::User, open_id),
            ErrorCode::UserNotFound,
        );
    };
    if !existing.belongs_to(account_uuid) {
        return Ok(ApiResult::failure(
            ErrorCode::Unauthorized,
            WRONG_ACCOUNT_MESSAGE,
        ));
    }

    debug!(account = %account_uuid, user = %open_id, "Unassigning user");
    match tx.delete_user(open_id).await {
        Ok(()) => Ok(ApiResult::success()
            .with_message(format!("Successfully deleted user: {}", open_id))),
        Err(err) => failure_if_not_found(err, ErrorCode::UserNotFound),
    }
}
