//! Credential input validation.
//!
//! These checks run before any credential-authority call. A violation is a
//! local `AuthError::Validation` and must never generate network traffic —
//! the mock authority's call counters assert exactly that in tests.
//!
//! Password rules are asymmetric on purpose: login only requires the
//! minimum length (the authority is the judge of whether the password is
//! right), while signup enforces the full strength policy.

use once_cell::sync::Lazy;
use regex::Regex;

use super::AuthError;

/// Basic address shape: something, an `@`, something, a dot, something.
/// Deliverability is the authority's problem, not ours.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

const EMAIL_MAX_LEN: usize = 255;
const PASSWORD_MIN_LEN: usize = 6;
const PASSWORD_MAX_LEN: usize = 72;

/// Validates email shape and length.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.trim().is_empty() {
        return Err(AuthError::Validation("Email is required".into()));
    }
    if !EMAIL_RE.is_match(email.trim()) {
        return Err(AuthError::Validation("Invalid email format".into()));
    }
    if email.len() > EMAIL_MAX_LEN {
        return Err(AuthError::Validation(
            "Email is too long (maximum 255 characters)".into(),
        ));
    }
    Ok(())
}

/// Validates password length, and on signup the full strength policy
/// (at least one lowercase letter, one uppercase letter, and one digit).
pub fn validate_password(password: &str, signup: bool) -> Result<(), AuthError> {
    if password.is_empty() {
        return Err(AuthError::Validation("Password is required".into()));
    }
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(AuthError::Validation(
            "Password must be at least 6 characters long".into(),
        ));
    }
    if password.len() > PASSWORD_MAX_LEN {
        return Err(AuthError::Validation(
            "Password is too long (maximum 72 characters)".into(),
        ));
    }

    if signup {
        if !password.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(AuthError::Validation(
                "Password must contain at least one lowercase letter".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(AuthError::Validation(
                "Password must contain at least one uppercase letter".into(),
            ));
        }
        if !password.chars().any(|c| c.is_ascii_digit()) {
            return Err(AuthError::Validation(
                "Password must contain at least one number".into(),
            ));
        }
    }

    Ok(())
}

/// Validates that the signup confirmation matches the password.
pub fn validate_password_confirmation(
    password: &str,
    confirm_password: &str,
) -> Result<(), AuthError> {
    if confirm_password.is_empty() {
        return Err(AuthError::Validation(
            "Password confirmation is required".into(),
        ));
    }
    if password != confirm_password {
        return Err(AuthError::Validation("Passwords do not match".into()));
    }
    Ok(())
}

/// Normalizes an email for the authority: trim and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_address() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("  user@example.com  ").is_ok());
    }

    #[test]
    fn rejects_malformed_addresses() {
        for bad in ["", "plain", "no@dot", "@example.com", "a b@c.de", "a@b c.de"] {
            assert!(validate_email(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn rejects_overlong_email() {
        let email = format!("{}@example.com", "a".repeat(250));
        let err = validate_email(&email).unwrap_err();
        assert_eq!(
            err,
            AuthError::Validation("Email is too long (maximum 255 characters)".into())
        );
    }

    #[test]
    fn login_password_only_needs_length() {
        assert!(validate_password("secret", false).is_ok());
        assert!(validate_password("abc", false).is_err());
    }

    #[test]
    fn short_password_has_the_exact_message() {
        let err = validate_password("abc", false).unwrap_err();
        assert_eq!(
            err,
            AuthError::Validation("Password must be at least 6 characters long".into())
        );
    }

    #[test]
    fn signup_password_requires_upper_lower_digit() {
        assert!(validate_password("Secret1", true).is_ok());
        assert!(matches!(
            validate_password("secret1", true),
            Err(AuthError::Validation(m)) if m.contains("uppercase")
        ));
        assert!(matches!(
            validate_password("SECRET1", true),
            Err(AuthError::Validation(m)) if m.contains("lowercase")
        ));
        assert!(matches!(
            validate_password("Secrets", true),
            Err(AuthError::Validation(m)) if m.contains("number")
        ));
    }

    #[test]
    fn rejects_overlong_password() {
        let password = format!("Aa1{}", "x".repeat(80));
        assert!(validate_password(&password, true).is_err());
    }

    #[test]
    fn confirmation_must_match() {
        assert!(validate_password_confirmation("Secret1", "Secret1").is_ok());
        assert!(validate_password_confirmation("Secret1", "Secret2").is_err());
        assert!(validate_password_confirmation("Secret1", "").is_err());
    }

    #[test]
    fn normalize_trims_and_lowercases() {
        assert_eq!(normalize_email("  User@Example.COM "), "user@example.com");
    }
}
