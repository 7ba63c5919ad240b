//! Session cookie construction.
//!
//! The cookie pair is the session store: `access_token` expires with the
//! token itself, `refresh_token` lives for the configured number of days.
//! Writers must always emit both cookies together (or both removals) so
//! the pair never gets out of sync.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

use crate::domain::foundation::TokenPair;

pub const ACCESS_COOKIE: &str = "access_token";
pub const REFRESH_COOKIE: &str = "refresh_token";

/// Build the access + refresh cookie pair for an issued or rotated session.
///
/// The access cookie's Max-Age mirrors the authority's `expires_in`, so a
/// browser drops it roughly when the token dies. The refresh cookie
/// outlives it by policy.
pub fn session_cookies(
    pair: &TokenPair,
    refresh_ttl_days: u32,
    secure: bool,
) -> (Cookie<'static>, Cookie<'static>) {
    let access = Cookie::build((ACCESS_COOKIE, pair.access_token.clone()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::seconds(pair.expires_in as i64))
        .build();

    let refresh = Cookie::build((REFRESH_COOKIE, pair.refresh_token.clone()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(i64::from(refresh_ttl_days)))
        .build();

    (access, refresh)
}

/// Build removal cookies for both session cookies.
pub fn clear_session_cookies() -> (Cookie<'static>, Cookie<'static>) {
    let access = Cookie::build((ACCESS_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    let refresh = Cookie::build((REFRESH_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::ZERO)
        .build();

    (access, refresh)
}
