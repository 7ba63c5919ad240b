//! HTTP routes for the auth endpoints.

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::http::middleware::route_guard;

use super::handlers::{login, logout, me, refresh, register, AuthAppState};

/// Creates the auth router.
///
/// Logout is the only guarded endpoint here; login, register, refresh, and
/// the soft `me` probe must work without a verified session.
pub fn auth_router(state: AuthAppState) -> Router {
    let guarded = Router::new().route("/logout", post(logout)).layer(
        middleware::from_fn_with_state(state.validator.clone(), route_guard),
    );

    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/refresh", post(refresh))
        .route("/me", get(me))
        .merge(guarded)
        .with_state(state)
}
