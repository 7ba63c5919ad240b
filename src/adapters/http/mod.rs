//! HTTP adapters - REST API and middleware.

pub mod auth;
pub mod cookies;
pub mod error;
pub mod middleware;
pub mod profile;

// Re-export key types for convenience
pub use auth::{auth_router, AuthAppState};
pub use error::ApiError;
pub use middleware::{edge_gate, route_guard, CurrentUser, GateState};
pub use profile::{profile_router, ProfileAppState};
