//! Ports - interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.

mod credential_authority;

pub use credential_authority::{AuthorityError, CredentialAuthority};
