//! Access-token validation.
//!
//! Validation is deliberately refresh-free: the validator answers "who is
//! behind this token" and nothing else, which keeps it independently
//! testable from rotation. Refreshing on failure is the edge's job.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, Identity};
use crate::ports::{AuthorityError, CredentialAuthority};

/// Checks a presented access token against the credential authority.
#[derive(Clone)]
pub struct TokenValidator {
    authority: Arc<dyn CredentialAuthority>,
}

impl TokenValidator {
    pub fn new(authority: Arc<dyn CredentialAuthority>) -> Self {
        Self { authority }
    }

    /// Resolve the identity behind an access token.
    ///
    /// An empty token short-circuits to `Unauthenticated` without touching
    /// the authority. Any explicit authority rejection also maps to
    /// `Unauthenticated`; only transport-level trouble is reported as
    /// `AuthorityUnavailable` so callers can distinguish "bad token" from
    /// "no answer".
    pub async fn validate(&self, access_token: &str) -> Result<Identity, AuthError> {
        if access_token.is_empty() {
            return Err(AuthError::Unauthenticated);
        }

        match self.authority.get_user(access_token).await {
            Ok(identity) => Ok(identity),
            Err(AuthorityError::Rejected { status, message }) => {
                tracing::debug!(status, %message, "access token rejected");
                Err(AuthError::Unauthenticated)
            }
            Err(AuthorityError::Unavailable(detail)) => {
                tracing::error!(%detail, "authority unavailable during validation");
                Err(AuthError::AuthorityUnavailable(detail))
            }
        }
    }
}
