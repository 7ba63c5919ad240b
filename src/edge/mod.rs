//! Edge gate - the pre-handler admit/refresh/redirect decision.
//!
//! The gatekeeper is a pure state machine over the request path and the
//! two credential cookies; the HTTP wrapper in
//! `adapters::http::middleware::gate` applies its decision to real
//! requests and responses.

mod gatekeeper;
mod paths;

pub use gatekeeper::{GateDecision, Gatekeeper, IndeterminatePolicy};
pub use paths::PublicPaths;
