//! Profile HTTP adapter: guarded per-user profile data.

mod dto;
mod handlers;
mod routes;

pub use dto::{ProfileBody, ProfileResponse, UpdateProfileRequest};
pub use handlers::ProfileAppState;
pub use routes::profile_router;
