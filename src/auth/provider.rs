use std::future::Future;

use crate::models::{Principal, ProfileRecord};

use super::AuthError;

/// Minimum password length accepted at sign-up.
pub const MIN_PASSWORD_LEN: usize = 6;

const MAX_EMAIL_LEN: usize = 254;

/// Identity backend: owns credentials and the per-user profile record.
pub trait IdentityProvider: Send + Sync {
    /// Registers a new account and writes its profile record.
    fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> impl Future<Output = Result<Principal, AuthError>> + Send;

    fn sign_in(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<Principal, AuthError>> + Send;

    fn get_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = anyhow::Result<Option<ProfileRecord>>> + Send;
}

/// Checks applied before an account is created. Returns the trimmed email
/// and display name.
pub fn validate_new_account<'a>(
    email: &'a str,
    password: &str,
    display_name: &'a str,
) -> Result<(&'a str, &'a str), AuthError> {
    let email = validate_email(email)?;

    let display_name = display_name.trim();
    if display_name.is_empty() {
        return Err(AuthError::MissingDisplayName);
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AuthError::WeakPassword {
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok((email, display_name))
}

pub fn validate_email(email: &str) -> Result<&str, AuthError> {
    let email = email.trim();
    if email.is_empty() || email.len() > MAX_EMAIL_LEN {
        return Err(AuthError::InvalidEmail);
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => {
            Ok(email)
        }
        _ => Err(AuthError::InvalidEmail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_needs_local_part_and_domain() {
        assert!(validate_email("fan@example.com").is_ok());
        assert!(matches!(validate_email(""), Err(AuthError::InvalidEmail)));
        assert!(matches!(validate_email("no-at"), Err(AuthError::InvalidEmail)));
        assert!(matches!(validate_email("@example.com"), Err(AuthError::InvalidEmail)));
        assert!(matches!(validate_email("fan@"), Err(AuthError::InvalidEmail)));
        assert!(matches!(validate_email("a@b@c"), Err(AuthError::InvalidEmail)));
    }

    #[test]
    fn short_passwords_are_weak() {
        let err = validate_new_account("fan@example.com", "12345", "Fan").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword { min: 6 }));
        assert!(validate_new_account("fan@example.com", "123456", "Fan").is_ok());
    }

    #[test]
    fn display_name_is_required_and_trimmed() {
        assert!(matches!(
            validate_new_account("fan@example.com", "secret1", "   "),
            Err(AuthError::MissingDisplayName)
        ));
        let (_, name) = validate_new_account(" fan@example.com ", "secret1", " Fan ").unwrap();
        assert_eq!(name, "Fan");
    }
}
