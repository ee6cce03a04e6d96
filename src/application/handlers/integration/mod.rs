//! Marketplace integration handlers.
//!
//! [`EventDispatcher`] fetches the event behind a marketplace notification,
//! validates it and applies it to the subscriber store:
//!
//! ## Subscription events
//! - Order, change, cancel and notice
//!
//! ## User events
//! - Assignment and unassignment
//!
//! ## Addon events
//! - Order, change and cancel

mod addon;
mod error;
mod process_event;
mod subscription;
mod user_assignment;

#[cfg(test)]
mod fixtures;

pub use error::IntegrationError;
pub use process_event::{EventDispatcher, ProcessEventCommand};
