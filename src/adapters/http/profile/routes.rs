//! HTTP routes for the profile endpoints.

use axum::{
    middleware,
    routing::{get, patch},
    Router,
};

use crate::adapters::http::middleware::route_guard;
use crate::application::TokenValidator;

use super::handlers::{get_profile, update_profile, ProfileAppState};

/// Creates the profile router. Everything here sits behind the route
/// guard.
pub fn profile_router(state: ProfileAppState, validator: TokenValidator) -> Router {
    Router::new()
        .route("/me/profile", get(get_profile))
        .route("/me/profile", patch(update_profile))
        .layer(middleware::from_fn_with_state(validator, route_guard))
        .with_state(state)
}
