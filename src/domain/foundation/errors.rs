//! Authentication error taxonomy.
//!
//! These errors are domain-centric: they describe what went wrong from the
//! application's perspective, not the credential authority's. Authority
//! failures are classified into this taxonomy at the application layer so
//! the edge gate and route guard can apply a single fail-open/fail-closed
//! policy instead of re-interpreting provider responses.
//!
//! The load-bearing distinction is `RefreshRejected` vs
//! `RefreshIndeterminate`: conflating "the refresh token is invalid" with
//! "the authority is unreachable" logs users out during transient backend
//! outages.

use thiserror::Error;

/// Errors produced by the session issuer, token validator, refresh rotator,
/// and the gates built on top of them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Malformed input caught locally; surfaced verbatim and never sent to
    /// the authority.
    #[error("{0}")]
    Validation(String),

    /// Wrong email/password. One generic message, no hint of which field
    /// was wrong.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The authority rejected a login/signup for a reason other than bad
    /// credentials (unconfirmed email, duplicate account, rate limit).
    /// Carries the normalized user-facing message.
    #[error("{0}")]
    Rejected(String),

    /// Missing, invalid, or expired access token on a protected call.
    /// Recoverable by refreshing or re-authenticating.
    #[error("Not authenticated")]
    Unauthenticated,

    /// The authority explicitly reported the refresh token invalid or
    /// expired. Terminal: the caller must clear both cookies and force a
    /// full re-login.
    #[error("Session expired, please log in again")]
    RefreshRejected,

    /// The authority was unreachable or answered ambiguously during a
    /// refresh. Transient: the caller must NOT clear cookies; the next
    /// request's access-token check decides.
    #[error("Could not refresh session")]
    RefreshIndeterminate(String),

    /// Network/timeout/5xx talking to the authority during login, signup,
    /// or validation. Surfaced as "try again", never as bad credentials.
    #[error("Authentication service unavailable, please try again")]
    AuthorityUnavailable(String),
}

impl AuthError {
    /// True if the holder of this session must re-authenticate from scratch.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AuthError::RefreshRejected)
    }

    /// True for transient failures that may succeed on retry and must not
    /// destroy session state.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AuthError::RefreshIndeterminate(_) | AuthError::AuthorityUnavailable(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_credentials_message_does_not_name_a_field() {
        let msg = AuthError::InvalidCredentials.to_string();
        assert_eq!(msg, "Invalid email or password");
    }

    #[test]
    fn validation_message_is_surfaced_verbatim() {
        let err = AuthError::Validation("Password must be at least 6 characters long".into());
        assert_eq!(err.to_string(), "Password must be at least 6 characters long");
    }

    #[test]
    fn refresh_rejected_is_terminal() {
        assert!(AuthError::RefreshRejected.is_terminal());
        assert!(!AuthError::RefreshIndeterminate("timeout".into()).is_terminal());
        assert!(!AuthError::Unauthenticated.is_terminal());
    }

    #[test]
    fn transient_errors_are_flagged() {
        assert!(AuthError::RefreshIndeterminate("502".into()).is_transient());
        assert!(AuthError::AuthorityUnavailable("connect".into()).is_transient());
        assert!(!AuthError::RefreshRejected.is_transient());
        assert!(!AuthError::InvalidCredentials.is_transient());
    }

    #[test]
    fn transient_messages_do_not_leak_detail() {
        let err = AuthError::AuthorityUnavailable("connection refused to 10.0.0.3".into());
        assert!(!err.to_string().contains("10.0.0.3"));
        let err = AuthError::RefreshIndeterminate("dns failure for auth.internal".into());
        assert!(!err.to_string().contains("auth.internal"));
    }
}
