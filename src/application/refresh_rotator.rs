//! Refresh-token rotation.
//!
//! Exchanging a refresh token for a new pair invalidates the old token at
//! the authority, so rotation is at-most-effective-once per token. The
//! crux of this module is failure classification:
//!
//! - the authority *explicitly* refusing the token is terminal
//!   ([`AuthError::RefreshRejected`]) — the caller clears the session;
//! - the authority being unreachable, timing out, or erroring server-side
//!   is indeterminate ([`AuthError::RefreshIndeterminate`]) — the caller
//!   keeps the cookies and lets the next request decide.
//!
//! Conflating those two logs users out whenever the authority blips.

use std::sync::Arc;

use crate::domain::foundation::{AuthError, TokenPair};
use crate::ports::{AuthorityError, CredentialAuthority};

/// Exchanges refresh tokens for fresh access/refresh pairs.
#[derive(Clone)]
pub struct RefreshRotator {
    authority: Arc<dyn CredentialAuthority>,
}

impl RefreshRotator {
    pub fn new(authority: Arc<dyn CredentialAuthority>) -> Self {
        Self { authority }
    }

    /// Rotate a refresh token.
    ///
    /// The returned pair replaces the old one entirely; the caller must
    /// treat the old refresh token as dead. An empty token is terminal
    /// without an authority call.
    pub async fn rotate(&self, refresh_token: &str) -> Result<TokenPair, AuthError> {
        if refresh_token.is_empty() {
            return Err(AuthError::RefreshRejected);
        }

        match self.authority.refresh_session(refresh_token).await {
            Ok(pair) => {
                tracing::debug!(expires_in = pair.expires_in, "refresh token rotated");
                Ok(pair)
            }
            Err(AuthorityError::Rejected { status, message }) => {
                tracing::info!(status, %message, "refresh token rejected by authority");
                Err(AuthError::RefreshRejected)
            }
            Err(AuthorityError::Unavailable(detail)) => {
                tracing::warn!(%detail, "refresh outcome indeterminate");
                Err(AuthError::RefreshIndeterminate(detail))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::auth::MockCredentialAuthority;

    #[tokio::test]
    async fn rotation_returns_a_complete_new_pair() {
        let mock = Arc::new(
            MockCredentialAuthority::new().with_refresh_token("refresh-1", "user-1", "a@b.co"),
        );
        let rotator = RefreshRotator::new(mock.clone());

        let pair = rotator.rotate("refresh-1").await.unwrap();

        assert!(!pair.access_token.is_empty());
        assert!(!pair.refresh_token.is_empty());
        assert_ne!(pair.refresh_token, "refresh-1");
        assert!(pair.expires_in > 0);
        assert_eq!(mock.refresh_calls(), 1);
    }

    #[tokio::test]
    async fn refresh_token_is_single_use() {
        let mock = Arc::new(
            MockCredentialAuthority::new().with_refresh_token("refresh-1", "user-1", "a@b.co"),
        );
        let rotator = RefreshRotator::new(mock);

        rotator.rotate("refresh-1").await.unwrap();
        let err = rotator.rotate("refresh-1").await.unwrap_err();

        assert_eq!(err, AuthError::RefreshRejected);
    }

    #[tokio::test]
    async fn empty_token_is_rejected_without_a_call() {
        let mock = Arc::new(MockCredentialAuthority::new());
        let rotator = RefreshRotator::new(mock.clone());

        let err = rotator.rotate("").await.unwrap_err();

        assert_eq!(err, AuthError::RefreshRejected);
        assert_eq!(mock.refresh_calls(), 0);
    }

    #[tokio::test]
    async fn explicit_rejection_is_terminal() {
        let mock = Arc::new(MockCredentialAuthority::new());
        let rotator = RefreshRotator::new(mock);

        let err = rotator.rotate("stale-token").await.unwrap_err();

        assert_eq!(err, AuthError::RefreshRejected);
        assert!(err.is_terminal());
    }

    #[tokio::test]
    async fn outage_is_indeterminate_not_terminal() {
        let mock = Arc::new(
            MockCredentialAuthority::new()
                .with_refresh_error(AuthorityError::unavailable("request timed out")),
        );
        let rotator = RefreshRotator::new(mock);

        let err = rotator.rotate("refresh-1").await.unwrap_err();

        assert!(matches!(err, AuthError::RefreshIndeterminate(_)));
        assert!(err.is_transient());
        assert!(!err.is_terminal());
    }

    #[tokio::test]
    async fn server_error_is_indeterminate() {
        let mock = Arc::new(
            MockCredentialAuthority::new()
                .with_refresh_error(AuthorityError::unavailable("authority returned 503")),
        );
        let rotator = RefreshRotator::new(mock);

        let err = rotator.rotate("refresh-1").await.unwrap_err();

        assert!(matches!(err, AuthError::RefreshIndeterminate(_)));
    }
}
