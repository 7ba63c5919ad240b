//! Application layer - the three auth use-case services.
//!
//! Issuance, validation, and rotation are separate services on purpose:
//! the route guard composes only the validator, the edge gate composes
//! only the rotator, and neither can accidentally do the other's job.

mod refresh_rotator;
mod session_issuer;
mod token_validator;

pub use refresh_rotator::RefreshRotator;
pub use session_issuer::SessionIssuer;
pub use token_validator::TokenValidator;
