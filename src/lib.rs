//! Backroom - Authentication and session-continuity backend
//!
//! Fronts a remote credential authority with token issuance, per-request
//! edge gating, and authority-verified route guarding.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod edge;
pub mod ports;
