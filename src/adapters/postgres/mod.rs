//! PostgreSQL adapters - Database implementations for store ports.
//!
//! - `PostgresSubscriberStore` - Accounts, users and addons, one transaction
//!   per dispatched event

mod subscriber_store;

pub use subscriber_store::{PostgresSubscriberStore, PostgresSubscriberTransaction};
