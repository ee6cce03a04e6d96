//! Marketplace Integration - Subscription event endpoint
//!
//! This crate receives marketplace notifications, fetches the full event
//! through the OAuth-signed marketplace API, and applies subscription, user
//! and addon lifecycle changes to the local subscriber store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
