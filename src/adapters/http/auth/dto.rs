//! Request/response DTOs for the auth endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Identity, TokenPair};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Public view of an identity.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
}

impl From<&Identity> for UserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id.to_string(),
            email: identity.email.clone(),
        }
    }
}

/// Body for endpoints that issue a session. The tokens are duplicated in
/// the body for non-browser clients; browsers rely on the cookies.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub ok: bool,
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

impl SessionResponse {
    pub fn new(identity: &Identity, tokens: &TokenPair) -> Self {
        Self {
            ok: true,
            user: identity.into(),
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_in: tokens.expires_in,
        }
    }
}

/// Body for signup, which may or may not carry a session.
#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub ok: bool,
    pub user: UserResponse,
    pub requires_confirmation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

/// Body for the refresh endpoint.
#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub ok: bool,
    pub access_token: String,
    pub refresh_token: String,
    pub expires_in: u64,
}

impl From<&TokenPair> for RefreshResponse {
    fn from(tokens: &TokenPair) -> Self {
        Self {
            ok: true,
            access_token: tokens.access_token.clone(),
            refresh_token: tokens.refresh_token.clone(),
            expires_in: tokens.expires_in,
        }
    }
}

/// Body for the soft session probe. Always 200; `user` is null when no
/// live session could be established. The token fields are present only
/// when this request silently rotated the session, so non-browser
/// callers learn the new pair without parsing Set-Cookie.
#[derive(Debug, Default, Serialize)]
pub struct MeResponse {
    pub user: Option<UserResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
}

impl MeResponse {
    /// No live session and no rotation on this request.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Live session resolved from the presented access token.
    pub fn authenticated(identity: &Identity) -> Self {
        Self {
            user: Some(identity.into()),
            ..Self::default()
        }
    }

    /// A silent refresh rotated the session; the new pair travels in the
    /// body alongside the cookies.
    pub fn refreshed(user: Option<UserResponse>, tokens: &TokenPair) -> Self {
        Self {
            user,
            access_token: Some(tokens.access_token.clone()),
            refresh_token: Some(tokens.refresh_token.clone()),
            expires_in: Some(tokens.expires_in),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
