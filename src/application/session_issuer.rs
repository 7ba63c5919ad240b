//! Session issuance: login and signup.
//!
//! The issuer validates inputs locally, normalizes the email, calls the
//! credential authority, and maps provider rejections into the stable
//! domain taxonomy. It has no side effects of its own — the HTTP layer is
//! responsible for persisting the returned credentials into the cookie
//! store.

use std::sync::Arc;

use crate::domain::foundation::{
    normalize_email, validate_email, validate_password, validate_password_confirmation,
    AuthError, IssuedSession, SignupOutcome,
};
use crate::ports::{AuthorityError, CredentialAuthority};

/// Issues sessions by fronting the credential authority's password
/// primitives.
#[derive(Clone)]
pub struct SessionIssuer {
    authority: Arc<dyn CredentialAuthority>,
}

impl SessionIssuer {
    pub fn new(authority: Arc<dyn CredentialAuthority>) -> Self {
        Self { authority }
    }

    /// Log a user in. Validation violations fail fast and never reach the
    /// authority.
    pub async fn login(&self, email: &str, password: &str) -> Result<IssuedSession, AuthError> {
        validate_email(email)?;
        validate_password(password, false)?;

        let email = normalize_email(email);

        let session = self
            .authority
            .sign_in(&email, password)
            .await
            .map_err(|e| classify_rejection(e, "Invalid email or password"))?;

        tracing::info!(user = %session.identity.id, "login succeeded");
        Ok(session)
    }

    /// Create an account. Signup applies the full password strength policy
    /// and requires a matching confirmation.
    ///
    /// A successful outcome without tokens means the authority wants the
    /// email confirmed first — a valid state, not a failure.
    pub async fn signup(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<SignupOutcome, AuthError> {
        validate_email(email)?;
        validate_password(password, true)?;
        validate_password_confirmation(password, confirm_password)?;

        let email = normalize_email(email);

        let outcome = self
            .authority
            .sign_up(&email, password)
            .await
            .map_err(|e| classify_rejection(e, "Failed to create account"))?;

        if outcome.requires_confirmation() {
            tracing::info!(user = %outcome.identity.id, "signup pending email confirmation");
        } else {
            tracing::info!(user = %outcome.identity.id, "signup issued a session");
        }
        Ok(outcome)
    }
}

/// Maps an authority failure on the issuance path into the domain taxonomy.
///
/// Explicit rejections become `InvalidCredentials` or a normalized
/// `Rejected` message; everything ambiguous becomes `AuthorityUnavailable`
/// so the caller renders "try again" instead of blaming the credentials.
/// Raw 5xx text never leaves this function except into the log.
fn classify_rejection(err: AuthorityError, fallback: &str) -> AuthError {
    match err {
        AuthorityError::Rejected { status, message } => {
            tracing::warn!(status, %message, "authority rejected credential request");
            match status {
                400 if message.contains("Invalid login credentials") => {
                    AuthError::InvalidCredentials
                }
                400 if message.contains("Email not confirmed") => {
                    AuthError::Rejected("Please verify your email before logging in".into())
                }
                401 => AuthError::InvalidCredentials,
                422 if message.contains("Password") => {
                    AuthError::Rejected("Password does not meet requirements".into())
                }
                422 if message.contains("Email") => {
                    AuthError::Rejected("Invalid email format".into())
                }
                429 => AuthError::Rejected("Too many requests. Please try again later".into()),
                _ if !message.is_empty() => AuthError::Rejected(message),
                _ => AuthError::Rejected(fallback.into()),
            }
        }
        AuthorityError::Unavailable(detail) => {
            tracing::error!(%detail, "authority unavailable during issuance");
            AuthError::AuthorityUnavailable(detail)
        }
    }
}
