//! HTTP handlers for the auth endpoints.
//!
//! These handlers own the cookie store: every path that issues, rotates,
//! or retires a session writes both cookies together. The application
//! services below them never touch cookies.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;

use crate::adapters::http::cookies::{
    clear_session_cookies, session_cookies, ACCESS_COOKIE, REFRESH_COOKIE,
};
use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CurrentUser;
use crate::application::{RefreshRotator, SessionIssuer, TokenValidator};
use crate::domain::foundation::{AuthError, TokenPair};
use crate::ports::CredentialAuthority;

use super::dto::{
    LoginRequest, MeResponse, OkResponse, RefreshResponse, RegisterRequest, RegisterResponse,
    SessionResponse,
};

/// Shared state for the auth endpoints.
#[derive(Clone)]
pub struct AuthAppState {
    pub issuer: SessionIssuer,
    pub validator: TokenValidator,
    pub rotator: RefreshRotator,
    pub authority: Arc<dyn CredentialAuthority>,
    pub refresh_ttl_days: u32,
    pub secure_cookies: bool,
}

impl AuthAppState {
    pub fn new(
        authority: Arc<dyn CredentialAuthority>,
        refresh_ttl_days: u32,
        secure_cookies: bool,
    ) -> Self {
        Self {
            issuer: SessionIssuer::new(authority.clone()),
            validator: TokenValidator::new(authority.clone()),
            rotator: RefreshRotator::new(authority.clone()),
            authority,
            refresh_ttl_days,
            secure_cookies,
        }
    }

    fn write_session(&self, jar: CookieJar, tokens: &TokenPair) -> CookieJar {
        let (access, refresh) = session_cookies(tokens, self.refresh_ttl_days, self.secure_cookies);
        jar.add(access).add(refresh)
    }

    fn clear_session(&self, jar: CookieJar) -> CookieJar {
        let (access, refresh) = clear_session_cookies();
        jar.add(access).add(refresh)
    }
}

/// POST /auth/login
pub async fn login(
    State(state): State<AuthAppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> Response {
    match state.issuer.login(&req.email, &req.password).await {
        Ok(session) => {
            let body = SessionResponse::new(&session.identity, &session.tokens);
            let jar = state.write_session(jar, &session.tokens);
            (jar, Json(body)).into_response()
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// POST /auth/register
pub async fn register(
    State(state): State<AuthAppState>,
    jar: CookieJar,
    Json(req): Json<RegisterRequest>,
) -> Response {
    match state
        .issuer
        .signup(&req.email, &req.password, &req.confirm_password)
        .await
    {
        Ok(outcome) => {
            let body = RegisterResponse {
                ok: true,
                user: (&outcome.identity).into(),
                requires_confirmation: outcome.requires_confirmation(),
                access_token: outcome.tokens.as_ref().map(|t| t.access_token.clone()),
                refresh_token: outcome.tokens.as_ref().map(|t| t.refresh_token.clone()),
                expires_in: outcome.tokens.as_ref().map(|t| t.expires_in),
            };
            // Confirmation-pending signups get no cookies; nothing to store.
            match &outcome.tokens {
                Some(tokens) => {
                    let jar = state.write_session(jar, tokens);
                    (StatusCode::CREATED, jar, Json(body)).into_response()
                }
                None => (StatusCode::CREATED, Json(body)).into_response(),
            }
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// GET /auth/me
///
/// Soft session probe: always 200. Tries the access cookie first, then a
/// silent refresh from the refresh cookie. A terminal refresh rejection
/// retires both cookies; an indeterminate outcome leaves them untouched so
/// the session survives an authority blip.
pub async fn me(State(state): State<AuthAppState>, jar: CookieJar) -> Response {
    let access = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    match state.validator.validate(&access).await {
        Ok(identity) => {
            return Json(MeResponse::authenticated(&identity)).into_response();
        }
        Err(AuthError::AuthorityUnavailable(_)) => {
            // Can't tell; report no user but keep the cookies.
            return Json(MeResponse::anonymous()).into_response();
        }
        Err(_) => {}
    }

    let refresh = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    // Nothing to rotate and nothing to clear.
    if refresh.is_empty() {
        return Json(MeResponse::anonymous()).into_response();
    }

    match state.rotator.rotate(&refresh).await {
        Ok(pair) => {
            // The old refresh token died the moment rotation succeeded;
            // the new pair must reach the client even if the identity
            // lookup below fails.
            let user = match state.validator.validate(&pair.access_token).await {
                Ok(identity) => Some((&identity).into()),
                Err(err) => {
                    tracing::warn!(error = %err, "identity lookup failed after silent refresh");
                    None
                }
            };
            let body = MeResponse::refreshed(user, &pair);
            let jar = state.write_session(jar, &pair);
            (jar, Json(body)).into_response()
        }
        Err(AuthError::RefreshRejected) => {
            let jar = state.clear_session(jar);
            (jar, Json(MeResponse::anonymous())).into_response()
        }
        Err(_) => Json(MeResponse::anonymous()).into_response(),
    }
}

/// POST /auth/refresh
///
/// Explicit cookie-borne rotation. 401 with removed cookies on a terminal
/// rejection; 503 with cookies untouched when the outcome is
/// indeterminate.
pub async fn refresh(State(state): State<AuthAppState>, jar: CookieJar) -> Response {
    let refresh = jar
        .get(REFRESH_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    // No cookie on the request means nothing to clear on the response.
    if refresh.is_empty() {
        return ApiError(AuthError::RefreshRejected).into_response();
    }

    match state.rotator.rotate(&refresh).await {
        Ok(pair) => {
            let body = RefreshResponse::from(&pair);
            let jar = state.write_session(jar, &pair);
            (jar, Json(body)).into_response()
        }
        Err(err @ AuthError::RefreshRejected) => {
            let jar = state.clear_session(jar);
            (jar, ApiError(err)).into_response()
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// POST /auth/logout
///
/// Guarded. The authority call is best effort: the local session dies
/// either way, and a failure to revoke server-side must not keep the user
/// logged in.
pub async fn logout(
    State(state): State<AuthAppState>,
    CurrentUser(user): CurrentUser,
    jar: CookieJar,
) -> Response {
    let access = jar
        .get(ACCESS_COOKIE)
        .map(|c| c.value().to_string())
        .unwrap_or_default();

    if let Err(err) = state.authority.sign_out(&access).await {
        tracing::warn!(user = %user.id, error = %err, "authority sign-out failed, clearing cookies anyway");
    } else {
        tracing::info!(user = %user.id, "logged out");
    }

    let jar = state.clear_session(jar);
    (jar, Json(OkResponse { ok: true })).into_response()
}
