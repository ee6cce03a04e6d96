//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod integration;

pub use integration::{EventDispatcher, IntegrationError, ProcessEventCommand};
