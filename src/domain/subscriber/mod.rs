//! Subscriber records kept by the integration: accounts, their users and
//! their addons.

mod entities;

pub use entities::{Account, Addon, User};
