#[cfg(feature = "desktop")]
pub mod commands;
mod error;
mod password;
mod provider;
mod service;
mod session;

pub use error::AuthError;
pub(crate) use password::{hash_password, verify_password};
pub use provider::{validate_email, validate_new_account, IdentityProvider, MIN_PASSWORD_LEN};
pub use service::{AuthService, SignUpRequest};
pub use session::{Session, SessionSubscription};
