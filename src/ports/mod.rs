//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! dispatcher and the outside world. Adapters implement these ports.
//!
//! - `MarketplaceClient` - Reads event details from a marketplace endpoint
//! - `SubscriberStore` / `SubscriberTransaction` - Transactional access to
//!   accounts, users and addons

mod marketplace_client;
mod subscriber_store;

pub use marketplace_client::{MarketplaceClient, MarketplaceError};
pub use subscriber_store::{EntityKind, StoreError, SubscriberStore, SubscriberTransaction};
