//! Integration tests for the edge gate over real HTTP requests.
//!
//! A minimal page router sits behind the gate middleware; requests are
//! driven through `tower::ServiceExt::oneshot` with a mock credential
//! authority underneath, so every decision path is observable end to end:
//! status, Location, Set-Cookie, and authority call counts.

use std::sync::Arc;

use axum::{body::Body, http::Request, middleware, Router};
use http::{header, StatusCode};
use tower::ServiceExt;

use backroom::adapters::auth::MockCredentialAuthority;
use backroom::adapters::http::middleware::{edge_gate, GateState};
use backroom::application::RefreshRotator;
use backroom::edge::{Gatekeeper, IndeterminatePolicy};
use backroom::ports::AuthorityError;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn gated_app(mock: Arc<MockCredentialAuthority>) -> Router {
    gated_app_with_policy(mock, IndeterminatePolicy::FailOpen)
}

fn gated_app_with_policy(
    mock: Arc<MockCredentialAuthority>,
    policy: IndeterminatePolicy,
) -> Router {
    let state = GateState {
        gatekeeper: Gatekeeper::new(RefreshRotator::new(mock)).with_policy(policy),
        refresh_ttl_days: 30,
        secure_cookies: false,
    };

    Router::new()
        .fallback(|| async { "page" })
        .layer(middleware::from_fn_with_state(state, edge_gate))
}

fn get(path: &str, cookies: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(path);
    if let Some(cookies) = cookies {
        builder = builder.header(header::COOKIE, cookies);
    }
    builder.body(Body::empty()).unwrap()
}

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

fn location(response: &axum::response::Response) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

// =============================================================================
// Public paths
// =============================================================================

#[tokio::test]
async fn public_path_is_admitted_without_cookies_or_authority_calls() {
    let mock = Arc::new(MockCredentialAuthority::new());
    let app = gated_app(mock.clone());

    let response = app.oneshot(get("/login", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn public_path_ignores_stale_credentials() {
    let mock = Arc::new(MockCredentialAuthority::new());
    let app = gated_app(mock.clone());

    let response = app
        .oneshot(get(
            "/about",
            Some("access_token=dead; refresh_token=dead"),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(mock.total_calls(), 0);
}

// =============================================================================
// Protected paths
// =============================================================================

#[tokio::test]
async fn no_cookies_redirects_to_login_with_return_path_and_no_set_cookie() {
    let mock = Arc::new(MockCredentialAuthority::new());
    let app = gated_app(mock);

    let response = app.oneshot(get("/profile", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=%2Fprofile");
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn access_cookie_admits_without_authority_call_or_cookie_rewrite() {
    let mock = Arc::new(MockCredentialAuthority::new());
    let app = gated_app(mock.clone());

    let response = app
        .oneshot(get("/profile", Some("access_token=live-access")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
    assert_eq!(mock.total_calls(), 0);
}

#[tokio::test]
async fn refresh_only_request_rotates_once_and_sets_exactly_two_cookies() {
    let mock = Arc::new(
        MockCredentialAuthority::new().with_refresh_token("refresh-1", "user-1", "a@b.co"),
    );
    let app = gated_app(mock.clone());

    let response = app
        .oneshot(get("/profile", Some("refresh_token=refresh-1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
    assert!(cookies.iter().all(|c| c.contains("HttpOnly")));
    // The old refresh token must not be written back.
    assert!(!cookies
        .iter()
        .any(|c| c.starts_with("refresh_token=refresh-1;")));
    assert_eq!(mock.refresh_calls(), 1);
    assert_eq!(mock.get_user_calls(), 0);
}

#[tokio::test]
async fn rejected_refresh_redirects_and_clears_both_cookies() {
    let mock = Arc::new(MockCredentialAuthority::new());
    let app = gated_app(mock);

    let response = app
        .oneshot(get("/profile", Some("refresh_token=stale")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=%2Fprofile");
    let cookies = set_cookies(&response);
    assert_eq!(cookies.len(), 2);
    assert!(cookies.iter().any(|c| c.starts_with("access_token=;")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=;")));
}

#[tokio::test]
async fn indeterminate_refresh_fails_open_with_cookies_untouched() {
    let mock = Arc::new(
        MockCredentialAuthority::new()
            .with_refresh_error(AuthorityError::unavailable("authority returned 503")),
    );
    let app = gated_app(mock);

    let response = app
        .oneshot(get("/profile", Some("refresh_token=refresh-1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn fail_closed_policy_redirects_on_indeterminate_without_clearing() {
    let mock = Arc::new(
        MockCredentialAuthority::new()
            .with_refresh_error(AuthorityError::unavailable("timeout")),
    );
    let app = gated_app_with_policy(mock, IndeterminatePolicy::FailClosed);

    let response = app
        .oneshot(get("/profile", Some("refresh_token=refresh-1")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert!(set_cookies(&response).is_empty());
}

#[tokio::test]
async fn nested_path_is_encoded_into_the_redirect_target() {
    let mock = Arc::new(MockCredentialAuthority::new());
    let app = gated_app(mock);

    let response = app.oneshot(get("/chat/room/7", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location(&response), "/login?redirect=%2Fchat%2Froom%2F7");
}

#[tokio::test]
async fn login_prefix_lookalike_path_is_not_public() {
    let mock = Arc::new(MockCredentialAuthority::new());
    let app = gated_app(mock);

    let response = app.oneshot(get("/login-history", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}
