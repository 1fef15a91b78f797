use thiserror::Error;

/// Failures surfaced verbatim to the sign-in and sign-up forms.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("An account with this email already exists")]
    EmailInUse,
    #[error("Password should be at least {min} characters")]
    WeakPassword { min: usize },
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Display name is required")]
    MissingDisplayName,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("authentication backend failed: {0:#}")]
    Backend(anyhow::Error),
}
