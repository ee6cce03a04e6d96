//! Dispatch result reported back to the marketplace.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Failure codes understood by the marketplace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    UnknownError,
    UserAlreadyExists,
    AccountNotFound,
    UserNotFound,
    Unauthorized,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnknownError => "UNKNOWN_ERROR",
            ErrorCode::UserAlreadyExists => "USER_ALREADY_EXISTS",
            ErrorCode::AccountNotFound => "ACCOUNT_NOT_FOUND",
            ErrorCode::UserNotFound => "USER_NOT_FOUND",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of processing one event.
///
/// An error code is present if and only if the result is a failure. The only
/// way to attach one is [`ApiResult::failure`], so every value upholds this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    account_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
}

impl ApiResult {
    pub fn success() -> Self {
        Self {
            success: true,
            error_code: None,
            message: None,
            account_identifier: None,
            id: None,
        }
    }

    pub fn failure(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_code: Some(code),
            message: Some(message.into()),
            account_identifier: None,
            id: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Identifier of the account the marketplace should store for later events.
    pub fn with_account_identifier(mut self, account_identifier: impl Into<String>) -> Self {
        self.account_identifier = Some(account_identifier.into());
        self
    }

    /// Identifier of a created resource, such as an addon instance.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error_code
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn account_identifier(&self) -> Option<&str> {
        self.account_identifier.as_deref()
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_has_no_error_code() {
        let result = ApiResult::success().with_message("done");
        assert!(result.is_success());
        assert_eq!(result.error_code(), None);
        assert_eq!(result.message(), Some("done"));
    }

    #[test]
    fn failure_carries_code_and_message() {
        let result = ApiResult::failure(ErrorCode::AccountNotFound, "no such account");
        assert!(!result.is_success());
        assert_eq!(result.error_code(), Some(ErrorCode::AccountNotFound));
        assert_eq!(result.message(), Some("no such account"));
    }

    #[test]
    fn serializes_camel_case_and_skips_absent_fields() {
        let result = ApiResult::success().with_account_identifier("acct-1");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "success": true, "accountIdentifier": "acct-1" })
        );

        let result = ApiResult::failure(ErrorCode::UserAlreadyExists, "taken");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "success": false, "errorCode": "USER_ALREADY_EXISTS", "message": "taken" })
        );
    }

    #[test]
    fn error_code_display_matches_wire_name() {
        assert_eq!(ErrorCode::Unauthorized.to_string(), "UNAUTHORIZED");
        assert_eq!(
            serde_json::to_string(&ErrorCode::UserNotFound).unwrap(),
            "\"USER_NOT_FOUND\""
        );
    }
}
