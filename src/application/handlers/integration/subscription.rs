//! Subscription lifecycle events: order, change, cancel and notice.

use tracing::{debug, info};

use crate::domain::integration::{AccountBean, ApiResult, ErrorCode, EventInfo, UserBean};
use crate::ports::SubscriberTransaction;

use super::error::{failure_if_not_found, IntegrationError};

pub(super) const USER_ALREADY_HAS_ACCOUNT_MESSAGE: &str = "An account with this user already exists.";

/// Creates the account and makes the purchasing user its administrator.
pub(super) async fn subscription_order(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
    marketplace_base_url: &str,
) -> Result<ApiResult, IntegrationError> {
    let creator = event.require_creator()?;
    let company = event.require_company()?;
    let order = event.require_order()?;

    if tx.find_user_by_open_id(&creator.open_id).await?.is_some() {
        return Ok(ApiResult::failure(
            ErrorCode::UserAlreadyExists,
            USER_ALREADY_HAS_ACCOUNT_MESSAGE,
        ));
    }

    let admin = UserBean {
        admin: true,
        ..UserBean::from_identity(creator)
    };
    let account = AccountBean {
        uuid: company.uuid.clone(),
        edition_code: order.edition_code.clone(),
        max_users: order.max_users(),
        marketplace_base_url: Some(marketplace_base_url.to_string()),
    };

    debug!(account = %account.uuid, admin = %admin.open_id, "Creating account");
    tx.create_account(&account, &admin).await?;

    Ok(ApiResult::success().with_account_identifier(account.uuid))
}

/// Updates edition and seat count of an existing account.
pub(super) async fn subscription_change(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
    marketplace_base_url: &str,
) -> Result<ApiResult, IntegrationError> {
    let account_info = event.require_account()?;
    let order = event.require_order()?;

    let account = AccountBean {
        uuid: account_info.account_identifier.clone(),
        edition_code: order.edition_code.clone(),
        max_users: order.max_users(),
        marketplace_base_url: Some(marketplace_base_url.to_string()),
    };

    match tx.update_account(&account).await {
        Ok(()) => Ok(ApiResult::success().with_message(format!(
            "Successfully updated account with identifier {}",
            account.uuid
        ))),
        Err(err) => failure_if_not_found(err, ErrorCode::AccountNotFound),
    }
}

/// Deletes an account together with its users and addons.
pub(super) async fn subscription_cancel(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
) -> Result<ApiResult, IntegrationError> {
    let account_uuid = &event.require_account()?.account_identifier;

    match tx.delete_account(account_uuid).await {
        Ok(()) => Ok(ApiResult::success().with_message(format!(
            "Successfully deleted account with identifier {}",
            account_uuid
        ))),
        Err(err) => failure_if_not_found(err, ErrorCode::AccountNotFound),
    }
}

/// Notices (suspension, reactivation, ...) need no local change.
pub(super) fn subscription_notice(event: &EventInfo) -> ApiResult {
    let notice = event
        .payload
        .as_ref()
        .and_then(|payload| payload.notice.as_ref())
        .and_then(|notice| notice.notice_type.as_deref());
    info!(notice = notice.unwrap_or("unspecified"), "Subscription notice received");
    ApiResult::success()
}
