use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};
use uuid::Uuid;

use crate::{
    auth::{hash_password, validate_email, validate_new_account, verify_password, AuthError, IdentityProvider},
    db::{
        connection::Database,
        helpers::{format_datetime, parse_datetime},
    },
    models::{Principal, ProfileRecord},
};

fn row_to_profile(row: &Row) -> Result<ProfileRecord> {
    let created_at: String = row.get("created_at")?;

    Ok(ProfileRecord {
        user_id: row.get("id")?,
        email: row.get("email")?,
        display_name: row.get("display_name")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

struct Credentials {
    principal: Principal,
    password_hash: String,
}

impl Database {
    async fn insert_user(
        &self,
        email: String,
        display_name: String,
        password_hash: String,
    ) -> Result<Option<Principal>> {
        self.execute(move |conn| {
            let taken: Option<String> = conn
                .query_row(
                    "SELECT id FROM users WHERE email = ?1",
                    params![email],
                    |row| row.get(0),
                )
                .optional()?;
            if taken.is_some() {
                return Ok(None);
            }

            let user_id = Uuid::new_v4().to_string();
            conn.execute(
                "INSERT INTO users (id, email, display_name, password_hash, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    user_id,
                    email,
                    display_name,
                    password_hash,
                    format_datetime(&Utc::now()),
                ],
            )
            .context("failed to insert user")?;

            Ok(Some(Principal {
                user_id,
                email,
                display_name: Some(display_name),
            }))
        })
        .await
    }

    async fn find_credentials(&self, email: String) -> Result<Option<Credentials>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, display_name, password_hash
                 FROM users
                 WHERE email = ?1",
            )?;

            let credentials = stmt
                .query_row(params![email], |row| {
                    Ok(Credentials {
                        principal: Principal {
                            user_id: row.get(0)?,
                            email: row.get(1)?,
                            display_name: row.get(2)?,
                        },
                        password_hash: row.get(3)?,
                    })
                })
                .optional()?;

            Ok(credentials)
        })
        .await
    }

    pub async fn get_user_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, email, display_name, created_at
                 FROM users
                 WHERE id = ?1",
            )?;

            let mut rows = stmt.query(params![user_id])?;
            let profile = match rows.next()? {
                Some(row) => Some(row_to_profile(row)?),
                None => None,
            };
            Ok(profile)
        })
        .await
    }
}

impl IdentityProvider for Database {
    async fn create_account(
        &self,
        email: &str,
        password: &str,
        display_name: &str,
    ) -> Result<Principal, AuthError> {
        let (email, display_name) = validate_new_account(email, password, display_name)?;

        let password = password.to_string();
        let password_hash = tokio::task::spawn_blocking(move || hash_password(&password))
            .await
            .map_err(|err| AuthError::Backend(anyhow!("password hashing task failed: {err}")))?
            .map_err(|err| AuthError::Backend(anyhow!("failed to hash password: {err}")))?;

        self.insert_user(email.to_string(), display_name.to_string(), password_hash)
            .await
            .map_err(AuthError::Backend)?
            .ok_or(AuthError::EmailInUse)
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Principal, AuthError> {
        let email = validate_email(email).map_err(|_| AuthError::InvalidCredentials)?;

        let Some(credentials) = self
            .find_credentials(email.to_string())
            .await
            .map_err(AuthError::Backend)?
        else {
            return Err(AuthError::InvalidCredentials);
        };

        let password = password.to_string();
        let hash = credentials.password_hash;
        let verified = tokio::task::spawn_blocking(move || verify_password(&password, &hash))
            .await
            .map_err(|err| AuthError::Backend(anyhow!("password check task failed: {err}")))?;

        if verified {
            Ok(credentials.principal)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRecord>> {
        self.get_user_profile(user_id).await
    }
}
