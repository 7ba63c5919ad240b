//! HTTP handlers for the profile endpoints.
//!
//! Profiles are app-local data keyed by the authority's user id; the
//! authority itself only knows about credentials. The store is in-memory
//! for now.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ApiError;
use crate::adapters::http::middleware::CurrentUser;
use crate::domain::foundation::AuthError;

use super::dto::{ProfileBody, ProfileResponse, UpdateProfileRequest};

const MAX_DISPLAY_NAME: usize = 100;
const MAX_BIO: usize = 500;
const MAX_PHONE: usize = 20;

/// Shared state for the profile endpoints.
#[derive(Clone, Default)]
pub struct ProfileAppState {
    profiles: Arc<RwLock<HashMap<String, ProfileBody>>>,
}

impl ProfileAppState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// GET /users/me/profile
pub async fn get_profile(
    State(state): State<ProfileAppState>,
    CurrentUser(user): CurrentUser,
) -> Response {
    let profile = state
        .profiles
        .read()
        .expect("profile store poisoned")
        .get(user.id.as_str())
        .cloned()
        .unwrap_or_default();

    let body = ProfileResponse {
        user: (&user).into(),
        profile,
    };
    Json(body).into_response()
}

/// PATCH /users/me/profile
pub async fn update_profile(
    State(state): State<ProfileAppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Response {
    if let Err(message) = validate_update(&req) {
        return ApiError(AuthError::Validation(message)).into_response();
    }

    let updated = {
        let mut profiles = state.profiles.write().expect("profile store poisoned");
        let profile = profiles.entry(user.id.to_string()).or_default();
        if let Some(display_name) = req.display_name {
            profile.display_name = Some(display_name.trim().to_string());
        }
        if let Some(bio) = req.bio {
            profile.bio = Some(bio.trim().to_string());
        }
        if let Some(phone) = req.phone {
            profile.phone = Some(phone.trim().to_string());
        }
        profile.clone()
    };

    tracing::info!(user = %user.id, "profile updated");

    let body = ProfileResponse {
        user: (&user).into(),
        profile: updated,
    };
    (StatusCode::OK, Json(body)).into_response()
}

fn validate_update(req: &UpdateProfileRequest) -> Result<(), String> {
    if let Some(name) = &req.display_name {
        if name.trim().is_empty() {
            return Err("Display name cannot be empty".to_string());
        }
        if name.chars().count() > MAX_DISPLAY_NAME {
            return Err("Display name must be 100 characters or less".to_string());
        }
    }
    if let Some(bio) = &req.bio {
        if bio.chars().count() > MAX_BIO {
            return Err("Bio must be 500 characters or less".to_string());
        }
    }
    if let Some(phone) = &req.phone {
        if phone.chars().count() > MAX_PHONE {
            return Err("Phone number must be 20 characters or less".to_string());
        }
    }
    Ok(())
}
