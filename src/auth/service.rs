use serde::Deserialize;

use crate::models::{Principal, ProfileRecord};

use super::{AuthError, IdentityProvider, Session};

const ENABLE_LOGS: bool = true;
use crate::{log_info, log_warn};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub display_name: String,
}

/// Binds an identity provider to the session it signs users into.
pub struct AuthService<I> {
    provider: I,
    session: Session,
}

impl<I: IdentityProvider> AuthService<I> {
    pub fn new(provider: I, session: Session) -> Self {
        Self { provider, session }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn sign_up(&self, request: SignUpRequest) -> Result<Principal, AuthError> {
        if request.password != request.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let principal = self
            .provider
            .create_account(&request.email, &request.password, &request.display_name)
            .await
            .inspect_err(|err| log_warn!("Sign-up failed: {err}"))?;

        log_info!("Created account {}", principal.user_id);
        self.session.set_principal(principal.clone());
        Ok(principal)
    }

    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let principal = self.provider.sign_in(email, password).await?;
        log_info!("User {} signed in", principal.user_id);
        self.session.set_principal(principal.clone());
        Ok(principal)
    }

    pub fn sign_out(&self) {
        self.session.sign_out();
    }

    pub fn current_principal(&self) -> Option<Principal> {
        self.session.current()
    }

    pub async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>, AuthError> {
        self.provider
            .get_profile(user_id)
            .await
            .map_err(AuthError::Backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;

    fn service() -> (tempfile::TempDir, AuthService<Database>) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("kitbag.sqlite3")).unwrap();
        (dir, AuthService::new(db, Session::new()))
    }

    fn request(password: &str, confirm: &str) -> SignUpRequest {
        SignUpRequest {
            email: "fan@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
            display_name: "Fan".into(),
        }
    }

    #[tokio::test]
    async fn mismatched_confirmation_is_checked_first() {
        let (_dir, auth) = service();
        // A weak password would also fail; the mismatch wins.
        assert!(matches!(
            auth.sign_up(request("abc", "abd")).await,
            Err(AuthError::PasswordMismatch)
        ));
        assert!(auth.current_principal().is_none());
    }

    #[tokio::test]
    async fn sign_up_signs_the_user_in() {
        let (_dir, auth) = service();
        let mut subscription = auth.session().subscribe();

        let principal = auth.sign_up(request("secret1", "secret1")).await.unwrap();
        assert_eq!(auth.current_principal(), Some(principal.clone()));
        assert_eq!(subscription.changed().await, Some(Some(principal.clone())));

        let profile = auth.get_profile(&principal.user_id).await.unwrap().unwrap();
        assert_eq!(profile.email, "fan@example.com");
    }

    #[tokio::test]
    async fn sign_out_then_sign_in_again() {
        let (_dir, auth) = service();
        let created = auth.sign_up(request("secret1", "secret1")).await.unwrap();

        auth.sign_out();
        assert!(!auth.session().is_signed_in());

        assert!(matches!(
            auth.sign_in("fan@example.com", "wrong-pass").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(!auth.session().is_signed_in());

        let signed_in = auth.sign_in("fan@example.com", "secret1").await.unwrap();
        assert_eq!(signed_in, created);
        assert!(auth.session().is_signed_in());
    }

    #[tokio::test]
    async fn weak_password_is_reported_with_minimum() {
        let (_dir, auth) = service();
        let err = auth.sign_up(request("abc", "abc")).await.unwrap_err();
        assert_eq!(err.to_string(), "Password should be at least 6 characters");
    }
}
