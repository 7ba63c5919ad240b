//! In-memory credential authority for tests.
//!
//! Implements the `CredentialAuthority` port without a network. Three
//! things make it useful beyond a stub:
//!
//! - per-operation call counters, so tests can assert "zero authority
//!   calls" for locally-rejected input and "exactly one rotation" for the
//!   silent-refresh path;
//! - forced errors per operation, for driving the rejected/indeterminate
//!   branches;
//! - real rotation semantics: a refresh token is consumed by a successful
//!   `refresh_session`, so re-using it is rejected exactly like a real
//!   authority would reject it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::foundation::{Identity, IssuedSession, SignupOutcome, TokenPair, UserId};
use crate::ports::{AuthorityError, CredentialAuthority};

const DEFAULT_EXPIRES_IN: u64 = 3600;

#[derive(Debug, Clone)]
struct MockAccount {
    password: String,
    identity: Identity,
}

/// Mock credential authority with call counting and single-use refresh
/// tokens.
#[derive(Debug, Default)]
pub struct MockCredentialAuthority {
    /// email -> registered account
    accounts: RwLock<HashMap<String, MockAccount>>,
    /// live access token -> identity
    sessions: RwLock<HashMap<String, Identity>>,
    /// live refresh token -> identity; entries are consumed on rotation
    refresh_tokens: RwLock<HashMap<String, Identity>>,

    sign_in_count: AtomicUsize,
    sign_up_count: AtomicUsize,
    get_user_count: AtomicUsize,
    refresh_count: AtomicUsize,
    sign_out_count: AtomicUsize,
    token_seq: AtomicUsize,

    force_sign_in: RwLock<Option<AuthorityError>>,
    force_sign_up: RwLock<Option<AuthorityError>>,
    force_get_user: RwLock<Option<AuthorityError>>,
    force_refresh: RwLock<Option<AuthorityError>>,

    confirmation_required: AtomicBool,
}

impl MockCredentialAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    fn identity(user_id: &str, email: &str) -> Identity {
        Identity::new(UserId::new(user_id).unwrap(), email)
    }

    /// Registers an account that `sign_in` will accept.
    pub fn with_account(
        self,
        email: impl Into<String>,
        password: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        let email = email.into();
        let account = MockAccount {
            password: password.into(),
            identity: Self::identity(&user_id.into(), &email),
        };
        self.accounts.write().unwrap().insert(email, account);
        self
    }

    /// Registers a live access token that `get_user` will resolve.
    pub fn with_session(
        self,
        access_token: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let identity = Self::identity(&user_id.into(), &email.into());
        self.sessions
            .write()
            .unwrap()
            .insert(access_token.into(), identity);
        self
    }

    /// Registers a live refresh token that `refresh_session` will rotate.
    pub fn with_refresh_token(
        self,
        refresh_token: impl Into<String>,
        user_id: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        let identity = Self::identity(&user_id.into(), &email.into());
        self.refresh_tokens
            .write()
            .unwrap()
            .insert(refresh_token.into(), identity);
        self
    }

    /// Makes `sign_up` defer session issuance (email confirmation flow).
    pub fn with_confirmation_required(self) -> Self {
        self.confirmation_required.store(true, Ordering::SeqCst);
        self
    }

    pub fn with_sign_in_error(self, error: AuthorityError) -> Self {
        *self.force_sign_in.write().unwrap() = Some(error);
        self
    }

    pub fn with_sign_up_error(self, error: AuthorityError) -> Self {
        *self.force_sign_up.write().unwrap() = Some(error);
        self
    }

    pub fn with_get_user_error(self, error: AuthorityError) -> Self {
        *self.force_get_user.write().unwrap() = Some(error);
        self
    }

    pub fn with_refresh_error(self, error: AuthorityError) -> Self {
        *self.force_refresh.write().unwrap() = Some(error);
        self
    }

    pub fn sign_in_calls(&self) -> usize {
        self.sign_in_count.load(Ordering::SeqCst)
    }

    pub fn sign_up_calls(&self) -> usize {
        self.sign_up_count.load(Ordering::SeqCst)
    }

    pub fn get_user_calls(&self) -> usize {
        self.get_user_count.load(Ordering::SeqCst)
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_count.load(Ordering::SeqCst)
    }

    pub fn sign_out_calls(&self) -> usize {
        self.sign_out_count.load(Ordering::SeqCst)
    }

    /// Total calls across all operations. Handy for "the authority was
    /// never contacted" assertions.
    pub fn total_calls(&self) -> usize {
        self.sign_in_calls()
            + self.sign_up_calls()
            + self.get_user_calls()
            + self.refresh_calls()
            + self.sign_out_calls()
    }

    /// Mints a fresh pair for `identity`, registering the access token as
    /// a live session and the refresh token as rotatable.
    fn mint_pair(&self, identity: &Identity) -> TokenPair {
        let seq = self.token_seq.fetch_add(1, Ordering::SeqCst);
        let pair = TokenPair::new(
            format!("access-{seq}"),
            format!("refresh-{seq}"),
            DEFAULT_EXPIRES_IN,
        );
        self.sessions
            .write()
            .unwrap()
            .insert(pair.access_token.clone(), identity.clone());
        self.refresh_tokens
            .write()
            .unwrap()
            .insert(pair.refresh_token.clone(), identity.clone());
        pair
    }
}

#[async_trait]
impl CredentialAuthority for MockCredentialAuthority {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthorityError> {
        self.sign_in_count.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.force_sign_in.read().unwrap().clone() {
            return Err(error);
        }

        let account = self.accounts.read().unwrap().get(email).cloned();
        match account {
            Some(account) if account.password == password => {
                let tokens = self.mint_pair(&account.identity);
                Ok(IssuedSession {
                    identity: account.identity,
                    tokens,
                })
            }
            _ => Err(AuthorityError::rejected(400, "Invalid login credentials")),
        }
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignupOutcome, AuthorityError> {
        self.sign_up_count.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.force_sign_up.read().unwrap().clone() {
            return Err(error);
        }

        if self.accounts.read().unwrap().contains_key(email) {
            return Err(AuthorityError::rejected(422, "User already registered"));
        }

        let seq = self.token_seq.fetch_add(1, Ordering::SeqCst);
        let identity = Self::identity(&format!("user-{seq}"), email);
        self.accounts.write().unwrap().insert(
            email.to_string(),
            MockAccount {
                password: password.to_string(),
                identity: identity.clone(),
            },
        );

        let tokens = if self.confirmation_required.load(Ordering::SeqCst) {
            None
        } else {
            Some(self.mint_pair(&identity))
        };

        Ok(SignupOutcome { identity, tokens })
    }

    async fn get_user(&self, access_token: &str) -> Result<Identity, AuthorityError> {
        self.get_user_count.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.force_get_user.read().unwrap().clone() {
            return Err(error);
        }

        self.sessions
            .read()
            .unwrap()
            .get(access_token)
            .cloned()
            .ok_or_else(|| AuthorityError::rejected(401, "invalid JWT"))
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, AuthorityError> {
        self.refresh_count.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.force_refresh.read().unwrap().clone() {
            return Err(error);
        }

        // Consume the token: rotation invalidates it even for concurrent
        // losers of the same race.
        let identity = self.refresh_tokens.write().unwrap().remove(refresh_token);
        match identity {
            Some(identity) => Ok(self.mint_pair(&identity)),
            None => Err(AuthorityError::rejected(
                400,
                "Invalid Refresh Token: Refresh Token Not Found",
            )),
        }
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthorityError> {
        self.sign_out_count.fetch_add(1, Ordering::SeqCst);
        self.sessions.write().unwrap().remove(access_token);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sign_in_accepts_registered_account() {
        let mock = MockCredentialAuthority::new().with_account("a@b.co", "Secret1", "user-1");

        let session = mock.sign_in("a@b.co", "Secret1").await.unwrap();

        assert_eq!(session.identity.email, "a@b.co");
        assert!(!session.tokens.access_token.is_empty());
    }

    #[tokio::test]
    async fn sign_in_rejects_wrong_password() {
        let mock = MockCredentialAuthority::new().with_account("a@b.co", "Secret1", "user-1");

        let err = mock.sign_in("a@b.co", "nope").await.unwrap_err();

        assert!(matches!(err, AuthorityError::Rejected { status: 400, .. }));
    }

    #[tokio::test]
    async fn minted_access_token_resolves_via_get_user() {
        let mock = MockCredentialAuthority::new().with_account("a@b.co", "Secret1", "user-1");

        let session = mock.sign_in("a@b.co", "Secret1").await.unwrap();
        let identity = mock.get_user(&session.tokens.access_token).await.unwrap();

        assert_eq!(identity.id.as_str(), "user-1");
    }

    #[tokio::test]
    async fn refresh_consumes_the_token() {
        let mock =
            MockCredentialAuthority::new().with_refresh_token("refresh-old", "user-1", "a@b.co");

        let pair = mock.refresh_session("refresh-old").await.unwrap();
        let reuse = mock.refresh_session("refresh-old").await;

        assert!(reuse.is_err());
        // but the newly minted refresh token rotates fine
        assert!(mock.refresh_session(&pair.refresh_token).await.is_ok());
    }

    #[tokio::test]
    async fn duplicate_sign_up_is_rejected() {
        let mock = MockCredentialAuthority::new().with_account("a@b.co", "Secret1", "user-1");

        let err = mock.sign_up("a@b.co", "Other99x").await.unwrap_err();

        assert!(matches!(err, AuthorityError::Rejected { status: 422, .. }));
    }

    #[tokio::test]
    async fn call_counters_track_each_operation() {
        let mock = MockCredentialAuthority::new().with_account("a@b.co", "Secret1", "user-1");

        let _ = mock.sign_in("a@b.co", "Secret1").await;
        let _ = mock.get_user("whatever").await;
        let _ = mock.refresh_session("whatever").await;

        assert_eq!(mock.sign_in_calls(), 1);
        assert_eq!(mock.get_user_calls(), 1);
        assert_eq!(mock.refresh_calls(), 1);
        assert_eq!(mock.total_calls(), 3);
    }

    #[tokio::test]
    async fn sign_out_revokes_the_session() {
        let mock = MockCredentialAuthority::new().with_session("token-1", "user-1", "a@b.co");

        mock.sign_out("token-1").await.unwrap();

        assert!(mock.get_user("token-1").await.is_err());
    }
}
