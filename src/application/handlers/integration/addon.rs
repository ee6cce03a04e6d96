//! Addon order, change and cancel events.

use tracing::debug;

use crate::domain::foundation::Timestamp;
use crate::domain::integration::{AddonBean, ApiResult, ErrorCode, EventInfo};
use crate::ports::{EntityKind, StoreError, SubscriberTransaction};

use super::error::{failure_if_not_found, IntegrationError};

/// Attaches a newly purchased addon to an account.
///
/// The generated addon identifier is returned as the result `id`; the
/// marketplace quotes it in later change and cancel events.
pub(super) async fn addon_order(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
) -> Result<ApiResult, IntegrationError> {
    let account_uuid = &event.require_account()?.account_identifier;
    let order = event.require_order()?;

    let code = order.addon_offering_code.clone();
    let addon = AddonBean {
        addon_identifier: AddonBean::generate_identifier(
            account_uuid,
            code.as_deref().unwrap_or_default(),
            Timestamp::now(),
        ),
        code,
        quantity: order.first_quantity(),
    };

    debug!(account = %account_uuid, addon = %addon.addon_identifier, "Creating addon");
    match tx.create_addon(&addon, account_uuid).await {
        Ok(()) => Ok(ApiResult::success().with_id(addon.addon_identifier)),
        Err(err) => failure_if_not_found(err, ErrorCode::AccountNotFound),
    }
}

/// Changes code and quantity of an existing addon.
///
/// The quantity is only replaced when the order lists an item.
pub(super) async fn addon_change(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
) -> Result<ApiResult, IntegrationError> {
    let account_uuid = &event.require_account()?.account_identifier;
    let order = event.require_order()?;
    let instance = event.require_addon_instance()?;

    let addon = AddonBean {
        addon_identifier: instance.id.clone(),
        code: order.addon_offering_code.clone(),
        quantity: order.first_quantity(),
    };

    match tx.update_addon(&addon, account_uuid).await {
        Ok(()) => Ok(ApiResult::success()),
        Err(
            err @ StoreError::NotFound {
                entity: EntityKind::Account,
                ..
            },
        ) => failure_if_not_found(err, ErrorCode::AccountNotFound),
        Err(err) => failure_if_not_found(err, ErrorCode::UnknownError),
    }
}

/// Removes an addon.
pub(super) async fn addon_cancel(
    tx: &mut dyn SubscriberTransaction,
    event: &EventInfo,
) -> Result<ApiResult, IntegrationError> {
    let addon_identifier = &event.require_addon_instance()?.id;

    match tx.delete_addon(addon_identifier).await {
        Ok(()) => Ok(ApiResult::success()
            .with_message(format!("Successfully cancelled addon: {}", addon_identifier))),
        Err(err) => failure_if_not_found(err, ErrorCode::AccountNotFound),
    }
}
