//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Credential authority URL must use HTTPS in production")]
    AuthorityMustBeHttps,

    #[error("Authority request timeout must be between 1 and 30 seconds")]
    InvalidAuthorityTimeout,

    #[error("Refresh cookie lifetime must be between 1 and 365 days")]
    InvalidRefreshTtl,
}
