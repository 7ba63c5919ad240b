//! HTTP mapping for domain auth errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::AuthError;

/// Wrapper that renders an [`AuthError`] as a JSON error response.
///
/// Status mapping:
/// - validation failures and explicit rejections are the caller's fault: 400
/// - missing/dead sessions: 401
/// - indeterminate outcomes and authority outages: 503, so clients can
///   retry instead of treating the session as dead
#[derive(Debug)]
pub struct ApiError(pub AuthError);

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AuthError::Validation(_) | AuthError::InvalidCredentials | AuthError::Rejected(_) => {
                StatusCode::BAD_REQUEST
            }
            AuthError::Unauthenticated | AuthError::RefreshRejected => StatusCode::UNAUTHORIZED,
            AuthError::RefreshIndeterminate(_) | AuthError::AuthorityUnavailable(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        };

        // Display impls are already scrubbed of authority detail.
        let body = Json(serde_json::json!({
            "ok": false,
            "message": self.0.to_string(),
        }));

        (status, body).into_response()
    }
}
