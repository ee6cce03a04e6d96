//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the dispatcher to external systems:
//! - `http` - Axum routes for inbound notifications
//! - `marketplace` - OAuth-signed marketplace API client
//! - `memory` - In-memory subscriber store
//! - `postgres` - PostgreSQL subscriber store

pub mod http;
pub mod marketplace;
pub mod memory;
pub mod postgres;

pub use marketplace::HttpMarketplaceClient;
pub use memory::InMemorySubscriberStore;
pub use postgres::PostgresSubscriberStore;
