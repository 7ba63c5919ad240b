//! Credential authority configuration

use secrecy::SecretString;
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Credential authority configuration (Supabase project)
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Authority base URL, e.g. `https://abc.supabase.co`
    pub authority_url: String,

    /// Publishable (anon) API key for the authority
    pub api_key: SecretString,

    /// Per-call deadline against the authority, in seconds. Kept short so
    /// an unreachable authority cannot stall page loads.
    #[serde(default = "default_authority_timeout")]
    pub request_timeout_secs: u64,
}

impl AuthConfig {
    /// Get the authority request deadline as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate authority configuration
    ///
    /// In production, requires HTTPS for the authority URL.
    /// In development, allows localhost with HTTP/HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.authority_url.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__AUTHORITY_URL"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 30 {
            return Err(ValidationError::InvalidAuthorityTimeout);
        }
        if *environment == Environment::Production && !self.authority_url.starts_with("https://") {
            return Err(ValidationError::AuthorityMustBeHttps);
        }
        Ok(())
    }
}

fn default_authority_timeout() -> u64 {
    3
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str) -> AuthConfig {
        AuthConfig {
            authority_url: url.to_string(),
            api_key: SecretString::new("anon-key".to_string()),
            request_timeout_secs: default_authority_timeout(),
        }
    }

    #[test]
    fn default_timeout_is_three_seconds() {
        let config = config("https://proj.supabase.co");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn missing_authority_url_is_rejected() {
        let config = config("");
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn production_requires_https() {
        let config = config("http://localhost:54321");
        assert!(config.validate(&Environment::Development).is_ok());
        assert!(matches!(
            config.validate(&Environment::Production),
            Err(ValidationError::AuthorityMustBeHttps)
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = config("https://proj.supabase.co");
        config.request_timeout_secs = 0;
        assert!(matches!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidAuthorityTimeout)
        ));
    }
}
