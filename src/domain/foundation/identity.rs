//! Identity value objects.
//!
//! An [`Identity`] is owned by the credential authority. This backend only
//! ever holds a projection of it, fetched fresh on each validation — it is
//! never cached beyond the request that resolved it and never used as a
//! source of authorization truth on the client side.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::AuthError;

/// Strongly-typed user identifier issued by the credential authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId, rejecting empty or whitespace-only values.
    pub fn new(id: impl Into<String>) -> Result<Self, AuthError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(AuthError::Validation("User id cannot be empty".into()));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The user identity resolved from a validated access token.
///
/// Provider-free domain type: any credential authority can populate it
/// through the `CredentialAuthority` port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Unique identifier assigned by the credential authority.
    pub id: UserId,

    /// Email address on record with the authority.
    pub email: String,
}

impl Identity {
    pub fn new(id: UserId, email: impl Into<String>) -> Self {
        Self {
            id,
            email: email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_accepts_opaque_value() {
        let id = UserId::new("5f1c2a9e-authority-id").unwrap();
        assert_eq!(id.as_str(), "5f1c2a9e-authority-id");
    }

    #[test]
    fn identity_round_trips_through_json() {
        let identity = Identity::new(UserId::new("user-1").unwrap(), "a@b.co");
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["id"], "user-1");
        assert_eq!(json["email"], "a@b.co");
    }
}
