//! Adapters - implementations of ports for external systems.

pub mod auth;
pub mod http;
