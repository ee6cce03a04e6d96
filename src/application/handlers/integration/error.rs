//! Errors that abort an event dispatch.

use thiserror::Error;

use crate::domain::integration::{ApiResult, ErrorCode, EventUrlError, IncompleteEvent};
use crate::ports::{MarketplaceError, StoreError};

/// Fatal dispatch errors.
///
/// Business outcomes (unknown account, duplicate user, ...) are reported as
/// failed [`ApiResult`]s instead. When one of these is returned, the store
/// transaction has not been committed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrationError {
    #[error("Invalid event URL: {0}")]
    InvalidEventUrl(#[from] EventUrlError),

    #[error("Neither an event URL nor an event token was supplied")]
    MissingToken,

    /// Only escapes a handler; the dispatcher reports it as a failure result.
    #[error(transparent)]
    IncompleteEvent(#[from] IncompleteEvent),

    #[error(transparent)]
    Marketplace(#[from] MarketplaceError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Turns a missing-record store error into a failure carrying `code`.
///
/// Anything else stays fatal.
pub(super) fn failure_if_not_found(
    err: StoreError,
    code: ErrorCode,
) -> Result<ApiResult, IntegrationError> {
    match err {
        StoreError::NotFound { .. } => Ok(ApiResult::failure(code, err.to_string())),
        other => Err(other.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::EntityKind;

    #[test]
    fn not_found_becomes_failure() {
        let result = failure_if_not_found(
            StoreError::not_found(EntityKind::User, "open-1"),
            ErrorCode::UserNotFound,
        )
        .unwrap();

        assert_eq!(result.error_code(), Some(ErrorCode::UserNotFound));
        assert_eq!(
            result.message(),
            Some("Could not find User with identifier open-1")
        );
    }

    #[test]
    fn storage_errors_stay_fatal() {
        let err = failure_if_not_found(StoreError::storage("disk full"), ErrorCode::UnknownError)
            .unwrap_err();
        assert_eq!(err, IntegrationError::Store(StoreError::storage("disk full")));
    }
}
