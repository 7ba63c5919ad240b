//! Foundation types shared across the domain.
//!
//! Provider-free building blocks: identities, session credential pairs,
//! the authentication error taxonomy, and the local credential validation
//! rules.

mod errors;
mod identity;
mod session;
mod validation;

pub use errors::AuthError;
pub use identity::{Identity, UserId};
pub use session::{IssuedSession, SignupOutcome, TokenPair};
pub use validation::{
    normalize_email, validate_email, validate_password, validate_password_confirmation,
};
