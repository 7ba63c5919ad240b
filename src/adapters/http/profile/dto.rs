//! Request/response DTOs for the profile endpoints.

use serde::{Deserialize, Serialize};

use crate::adapters::http::auth::UserResponse;

/// Mutable profile fields. All optional; a PATCH only touches what it
/// carries.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileBody {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: UserResponse,
    pub profile: ProfileBody,
}
