//! HTTP adapters - REST API implementations.

pub mod integration;

// Re-export key types for convenience
pub use integration::integration_router;
pub use integration::IntegrationAppState;
