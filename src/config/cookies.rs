//! Session cookie configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session cookie policy.
///
/// The access cookie's lifetime always comes from the authority's
/// `expires_in`; only the refresh cookie's lifetime is a local policy.
#[derive(Debug, Clone, Deserialize)]
pub struct CookieConfig {
    /// Refresh cookie Max-Age in days
    #[serde(default = "default_refresh_ttl_days")]
    pub refresh_ttl_days: u32,

    /// Force the `Secure` attribute regardless of environment. When unset,
    /// `Secure` follows the environment (on in production).
    pub secure: Option<bool>,
}

impl CookieConfig {
    /// Whether cookies carry the `Secure` attribute.
    pub fn secure_for(&self, production: bool) -> bool {
        self.secure.unwrap_or(production)
    }

    /// Validate cookie configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.refresh_ttl_days == 0 || self.refresh_ttl_days > 365 {
            return Err(ValidationError::InvalidRefreshTtl);
        }
        Ok(())
    }
}

impl Default for CookieConfig {
    fn default() -> Self {
        Self {
            refresh_ttl_days: default_refresh_ttl_days(),
            secure: None,
        }
    }
}

fn default_refresh_ttl_days() -> u32 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_thirty_days() {
        let config = CookieConfig::default();
        assert_eq!(config.refresh_ttl_days, 30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn secure_follows_environment_when_unset() {
        let config = CookieConfig::default();
        assert!(config.secure_for(true));
        assert!(!config.secure_for(false));
    }

    #[test]
    fn secure_override_wins() {
        let config = CookieConfig {
            secure: Some(true),
            ..Default::default()
        };
        assert!(config.secure_for(false));
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let config = CookieConfig {
            refresh_ttl_days: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ValidationError::InvalidRefreshTtl)));
    }
}
