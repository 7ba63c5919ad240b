//! Supabase (GoTrue) credential authority adapter.
//!
//! Implements the `CredentialAuthority` port against a GoTrue-style REST
//! surface:
//!
//! - `POST /auth/v1/token?grant_type=password` — password sign-in
//! - `POST /auth/v1/signup` — account creation
//! - `POST /auth/v1/token?grant_type=refresh_token` — rotation
//! - `GET  /auth/v1/user` — access-token introspection
//! - `POST /auth/v1/logout` — revocation
//!
//! The provider's replies are loosely typed JSON; this adapter models them
//! as structs carrying exactly the fields the domain needs and normalizes
//! everything else at the boundary. Failure classification is the
//! adapter's whole job: explicit 4xx answers become
//! `AuthorityError::Rejected`, while connect errors, timeouts, 5xx
//! responses, and unparseable bodies all become
//! `AuthorityError::Unavailable` so upstream policy can fail open.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::domain::foundation::{Identity, IssuedSession, SignupOutcome, TokenPair, UserId};
use crate::ports::{AuthorityError, CredentialAuthority};

/// Configuration for the Supabase adapter.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: String,

    /// Publishable (anon) API key sent with every request.
    pub api_key: SecretString,

    /// Per-request deadline. Kept low so an unreachable authority cannot
    /// stall page loads; a timeout is classified as `Unavailable`.
    pub request_timeout: Duration,
}

impl SupabaseConfig {
    pub fn new(base_url: impl Into<String>, api_key: SecretString) -> Self {
        Self {
            base_url: base_url.into(),
            api_key,
            request_timeout: Duration::from_secs(3),
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1{}", self.base_url.trim_end_matches('/'), path)
    }
}

// ---- wire types -----------------------------------------------------------

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSession {
    access_token: String,
    refresh_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
    user: WireUser,
}

fn default_expires_in() -> u64 {
    3600
}

/// GoTrue's signup reply is a session when auto-confirm is on, or a bare
/// user object when email confirmation is pending.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireSignup {
    Session(WireSession),
    UserOnly(WireUser),
}

/// GoTrue spells its error message differently across endpoints and
/// versions; accept all spellings.
#[derive(Debug, Default, Deserialize)]
struct WireError {
    #[serde(default)]
    error_description: Option<String>,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl WireError {
    fn into_message(self) -> String {
        self.error_description
            .or(self.msg)
            .or(self.message)
            .or(self.error)
            .unwrap_or_default()
    }
}

fn to_identity(user: WireUser) -> Result<Identity, AuthorityError> {
    let id = UserId::new(user.id)
        .map_err(|_| AuthorityError::unavailable("authority returned a user without an id"))?;
    let email = user
        .email
        .ok_or_else(|| AuthorityError::unavailable("authority returned a user without an email"))?;
    Ok(Identity::new(id, email))
}

fn to_pair_and_identity(session: WireSession) -> Result<(TokenPair, Identity), AuthorityError> {
    if session.access_token.is_empty() || session.refresh_token.is_empty() {
        return Err(AuthorityError::unavailable(
            "authority returned a session with empty tokens",
        ));
    }
    let identity = to_identity(session.user)?;
    let pair = TokenPair::new(session.access_token, session.refresh_token, session.expires_in);
    Ok((pair, identity))
}

// ---- adapter --------------------------------------------------------------

/// Production `CredentialAuthority` backed by Supabase GoTrue.
pub struct SupabaseAuthority {
    config: SupabaseConfig,
    http_client: reqwest::Client,
}

impl SupabaseAuthority {
    pub fn new(config: SupabaseConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            config,
            http_client,
        })
    }

    fn transport_error(err: reqwest::Error) -> AuthorityError {
        if err.is_timeout() {
            AuthorityError::unavailable("authority request timed out")
        } else {
            AuthorityError::unavailable(format!("authority request failed: {err}"))
        }
    }

    /// Turns a non-success response into an `AuthorityError`. 5xx never
    /// surfaces its body text; 4xx carries the provider message for the
    /// application layer to normalize.
    async fn classify_failure(response: reqwest::Response) -> AuthorityError {
        let status = response.status();
        if status.is_server_error() {
            return AuthorityError::unavailable(format!("authority returned {status}"));
        }
        let message = response
            .json::<WireError>()
            .await
            .unwrap_or_default()
            .into_message();
        AuthorityError::rejected(status.as_u16(), message)
    }

    async fn parse_ok<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, AuthorityError> {
        response
            .json::<T>()
            .await
            .map_err(|e| AuthorityError::unavailable(format!("malformed authority response: {e}")))
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http_client
            .post(self.config.endpoint(path))
            .header("apikey", self.config.api_key.expose_secret())
    }
}

#[async_trait]
impl CredentialAuthority for SupabaseAuthority {
    async fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> Result<IssuedSession, AuthorityError> {
        let response = self
            .post("/token?grant_type=password")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let session: WireSession = Self::parse_ok(response).await?;
        let (tokens, identity) = to_pair_and_identity(session)?;
        Ok(IssuedSession { identity, tokens })
    }

    async fn sign_up(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SignupOutcome, AuthorityError> {
        let response = self
            .post("/signup")
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        match Self::parse_ok::<WireSignup>(response).await? {
            WireSignup::Session(session) => {
                let (tokens, identity) = to_pair_and_identity(session)?;
                Ok(SignupOutcome {
                    identity,
                    tokens: Some(tokens),
                })
            }
            WireSignup::UserOnly(user) => Ok(SignupOutcome {
                identity: to_identity(user)?,
                tokens: None,
            }),
        }
    }

    async fn get_user(&self, access_token: &str) -> Result<Identity, AuthorityError> {
        let response = self
            .http_client
            .get(self.config.endpoint("/user"))
            .header("apikey", self.config.api_key.expose_secret())
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        to_identity(Self::parse_ok(response).await?)
    }

    async fn refresh_session(&self, refresh_token: &str) -> Result<TokenPair, AuthorityError> {
        let response = self
            .post("/token?grant_type=refresh_token")
            .json(&serde_json::json!({ "refresh_token": refresh_token }))
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }

        let session: WireSession = Self::parse_ok(response).await?;
        let (pair, _) = to_pair_and_identity(session)?;
        Ok(pair)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthorityError> {
        let response = self
            .post("/logout")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(Self::transport_error)?;

        if !response.status().is_success() {
            return Err(Self::classify_failure(response).await);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SupabaseAuthority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SupabaseAuthority")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}
