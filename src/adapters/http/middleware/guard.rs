//! Route guard middleware and extractors for axum.
//!
//! The guard is the authority-verified checkpoint: unlike the edge gate,
//! which trusts an access cookie on presence, the guard resolves the token
//! against the credential authority on every request it covers.
//!
//! ```text
//! Request → route_guard → injects Identity into extensions
//!                              ↓
//!                     Handler → CurrentUser extractor reads from extensions
//! ```
//!
//! The guard never refreshes. A request arriving here with a dead access
//! token gets a 401 and the client re-enters through the gate, which owns
//! rotation.

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::CookieJar;

use crate::adapters::http::cookies::ACCESS_COOKIE;
use crate::adapters::http::error::ApiError;
use crate::application::TokenValidator;
use crate::domain::foundation::{AuthError, Identity};

/// Guard middleware that verifies the caller's access token.
///
/// The token is read from the `access_token` cookie, falling back to an
/// `Authorization: Bearer` header for non-browser clients. On success the
/// resolved [`Identity`] is injected into request extensions; on failure
/// the request is answered directly:
///
/// - no token or a rejected token: 401
/// - authority unreachable: 503 (the session is not declared dead on an
///   outage)
pub async fn route_guard(
    State(validator): State<TokenValidator>,
    request: Request,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let cookie_token = jar.get(ACCESS_COOKIE).map(|c| c.value().to_string());

    let bearer_token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string);

    let token = cookie_token.or(bearer_token).unwrap_or_default();

    match validator.validate(&token).await {
        Ok(identity) => {
            let mut request = request;
            request.extensions_mut().insert(identity);
            next.run(request).await
        }
        Err(err) => ApiError(err).into_response(),
    }
}

/// Extractor for the identity the guard verified.
///
/// Only usable behind [`route_guard`]; elsewhere it rejects with 401.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Identity);

impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = GuardRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Identity>()
                .cloned()
                .map(CurrentUser)
                .ok_or(GuardRejection::Unauthenticated)
        })
    }
}

/// Rejection type for requests that reach a guarded handler unverified.
#[derive(Debug, Clone)]
pub enum GuardRejection {
    Unauthenticated,
}

impl IntoResponse for GuardRejection {
    fn into_response(self) -> Response {
        let message = match self {
            GuardRejection::Unauthenticated => AuthError::Unauthenticated.to_string(),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "ok": false,
                "message": message,
            })),
        )
            .into_response()
    }
}
