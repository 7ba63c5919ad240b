//! Domain layer - provider-free types and rules.

pub mod foundation;
