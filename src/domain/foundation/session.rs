//! Session credential types.
//!
//! A browser session is the pairing of a short-lived access token and a
//! long-lived refresh token. Tokens are opaque strings minted by the
//! credential authority; this backend never inspects or persists them, it
//! only moves them between the authority and the cookie store.

use serde::{Deserialize, Serialize};

use super::Identity;

/// An access/refresh pair plus the access token's lifetime in seconds.
///
/// This is the unit of rotation: exchanging the refresh token yields a
/// complete new pair and invalidates the old refresh token. The two values
/// must always be written to the cookie store together or not at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Opaque short-lived access token.
    pub access_token: String,

    /// Opaque long-lived, single-use refresh token.
    pub refresh_token: String,

    /// Access token lifetime in seconds, as reported by the authority.
    pub expires_in: u64,
}

impl TokenPair {
    pub fn new(
        access_token: impl Into<String>,
        refresh_token: impl Into<String>,
        expires_in: u64,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            expires_in,
        }
    }
}

/// Result of a successful login: who the user is plus their new session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedSession {
    pub identity: Identity,
    pub tokens: TokenPair,
}

/// Result of a successful signup.
///
/// `tokens: None` is a valid non-error outcome: the account was created
/// but the authority requires email confirmation before issuing a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignupOutcome {
    pub identity: Identity,
    pub tokens: Option<TokenPair>,
}

impl SignupOutcome {
    /// True when the authority deferred session issuance pending email
    /// confirmation.
    pub fn requires_confirmation(&self) -> bool {
        self.tokens.is_none()
    }
}
