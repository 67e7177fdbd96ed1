use regex::Regex;
use std::sync::OnceLock;

use super::entity::{LoginCredentials, RegisterCredentials};
use crate::domain::{DomainError, DomainResult};

pub const MIN_PASSWORD_LENGTH: usize = 6;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is a valid regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Both fields must be present before a login request is issued.
pub fn validate_login(credentials: &LoginCredentials) -> DomainResult<()> {
    if credentials.email.trim().is_empty() || credentials.password.is_empty() {
        return Err(DomainError::Validation("Please fill in all fields".to_string()));
    }
    Ok(())
}

/// Registration form rules, checked in the order the form reports them:
/// presence, confirmation match, length, email shape.
pub fn validate_registration(credentials: &RegisterCredentials) -> DomainResult<()> {
    let confirmation_missing = matches!(&credentials.confirm_password, Some(c) if c.is_empty());
    if credentials.username.trim().is_empty()
        || credentials.email.trim().is_empty()
        || credentials.password.is_empty()
        || confirmation_missing
    {
        return Err(DomainError::Validation("Please fill in all fields".to_string()));
    }

    if let Some(confirmation) = &credentials.confirm_password {
        if confirmation != &credentials.password {
            return Err(DomainError::Validation("Passwords do not match".to_string()));
        }
    }

    if credentials.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::Validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }

    if !is_valid_email(&credentials.email) {
        return Err(DomainError::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: DomainResult<()>) -> String {
        result.unwrap_err().to_string()
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login(&LoginCredentials::new("a@b.com", "secret1")).is_ok());
        assert_eq!(
            message(validate_login(&LoginCredentials::new("", "secret1"))),
            "Please fill in all fields"
        );
        assert!(validate_login(&LoginCredentials::new("a@b.com", "")).is_err());
    }

    #[test]
    fn test_registration_happy_path() {
        let creds = RegisterCredentials::new("ada", "ada@example.com", "secret1")
            .with_confirmation("secret1");
        assert!(validate_registration(&creds).is_ok());
    }

    #[test]
    fn test_registration_mismatch_reported_before_length() {
        let creds = RegisterCredentials::new("ada", "ada@example.com", "abc").with_confirmation("abd");
        assert_eq!(message(validate_registration(&creds)), "Passwords do not match");
    }

    #[test]
    fn test_registration_short_password() {
        let creds = RegisterCredentials::new("ada", "ada@example.com", "12345");
        assert_eq!(
            message(validate_registration(&creds)),
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn test_registration_empty_confirmation_counts_as_missing() {
        let creds =
            RegisterCredentials::new("ada", "ada@example.com", "secret1").with_confirmation("");
        assert_eq!(message(validate_registration(&creds)), "Please fill in all fields");
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.com"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));

        let creds = RegisterCredentials::new("ada", "not-an-email", "secret1");
        assert_eq!(
            message(validate_registration(&creds)),
            "Please enter a valid email address"
        );
    }
}
