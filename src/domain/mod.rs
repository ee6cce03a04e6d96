//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives
//! - `integration` - Marketplace events, validation, transfer objects and results
//! - `subscriber` - Accounts, users and addons maintained from those events

pub mod foundation;
pub mod integration;
pub mod subscriber;
