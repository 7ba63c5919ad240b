//! Auth HTTP adapter: session issuance, rotation, and retirement.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    LoginRequest, MeResponse, RefreshResponse, RegisterRequest, RegisterResponse, SessionResponse,
    UserResponse,
};
pub use handlers::AuthAppState;
pub use routes::auth_router;
