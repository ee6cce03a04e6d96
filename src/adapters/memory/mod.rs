//! In-memory adapters.

mod subscriber_store;

pub use subscriber_store::InMemorySubscriberStore;
