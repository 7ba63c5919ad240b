//! Credential authority port.
//!
//! The authority is an external identity provider that issues and validates
//! opaque bearer tokens and exposes a password sign-in/sign-up primitive.
//! This port is the only place the rest of the crate talks to it; the
//! application layer classifies [`AuthorityError`] into the domain
//! taxonomy, so implementations never need to know about gate policy.
//!
//! # Contract
//!
//! Implementations must:
//! - Return `AuthorityError::Rejected` only for explicit provider
//!   rejections (4xx), carrying the provider status and message.
//! - Return `AuthorityError::Unavailable` for anything ambiguous: network
//!   errors, timeouts, 5xx responses, unparseable bodies.
//! - Invalidate a refresh token once `refresh_session` succeeds with it
//!   (rotation is at-most-effective-once per refresh token).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{Identity, IssuedSession, SignupOutcome, TokenPair};

/// Failure reported by the credential authority, before domain
/// classification.
///
/// The split matters more than the detail: `Rejected` is the authority
/// saying "no", `Unavailable` is us not knowing what the authority would
/// have said.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorityError {
    /// The authority answered and explicitly refused.
    #[error("authority rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The authority could not be reached or gave an ambiguous answer.
    #[error("authority unavailable: {0}")]
    Unavailable(String),
}

impl AuthorityError {
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable(message.into())
    }
}

/// External identity provider issuing and validating opaque session tokens.
#[async_trait]
pub trait CredentialAuthority: Send + Sync {
    /// Exchange email+password for an identity and a fresh token pair.
    async fn sign_in(&self, email: &str, password: &str)
        -> Result<IssuedSession, AuthorityError>;

    /// Create an account. The authority may defer session issuance until
    /// the email is confirmed, in which case the outcome carries no tokens.
    async fn sign_up(&self, email: &str, password: &str)
        -> Result<SignupOutcome, AuthorityError>;

    /// Resolve the identity behind an access token. Rejection means the
    /// token is invalid or expired.
    async fn get_user(&self, access_token: &str) -> Result<Identity, AuthorityError>;

    /// Exchange a refresh token for a new pair, invalidating the old
    /// refresh token.
    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, AuthorityError>;

    /// Revoke the session behind an access token.
    async fn sign_out(&self, access_token: &str) -> Result<(), AuthorityError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_keeps_status_and_message() {
        let err = AuthorityError::rejected(401, "Invalid login credentials");
        assert_eq!(
            err,
            AuthorityError::Rejected {
                status: 401,
                message: "Invalid login credentials".into()
            }
        );
    }

    #[test]
    fn trait_is_object_safe_and_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn CredentialAuthority>();
        assert_send_sync::<std::sync::Arc<dyn CredentialAuthority>>();
    }
}
