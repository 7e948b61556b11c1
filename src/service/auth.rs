//! Registration and login against the users table.
//!
//! Credentials are compared through [`CredentialVerifier`]. The default [`PlaintextVerifier`]
//! stores the password as given and compares by equality, which is only suitable for a prototype.
//! A salted-hash verifier can replace it without changing the HTTP contract.

use crate::error::AppError;
use crate::service::RequestValidator;
use crate::store;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

pub const USERNAME_TAKEN: &str = "Username taken";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Body of `POST /api/auth`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct RegisterResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct LoginResponse {
    pub message: &'static str,
    pub username: String,
}

/// Turns a supplied password into its stored form and checks a login attempt against it.
pub trait CredentialVerifier: Send + Sync {
    fn stored_form(&self, password: &str) -> String;
    fn verify(&self, stored: &str, supplied: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PlaintextVerifier;

impl CredentialVerifier for PlaintextVerifier {
    fn stored_form(&self, password: &str) -> String {
        password.to_string()
    }

    fn verify(&self, stored: &str, supplied: &str) -> bool {
        stored == supplied
    }
}

pub struct AuthService;

impl AuthService {
    /// Register a new user. Usernames are unique and compared case-sensitively.
    pub async fn register(
        pool: &SqlitePool,
        verifier: &dyn CredentialVerifier,
        req: &RegisterRequest,
    ) -> Result<RegisterResponse, AppError> {
        let mut user = RequestValidator::validate_registration(req)?;
        if store::find_user_by_username(pool, &user.username).await?.is_some() {
            tracing::debug!(username = %user.username, "username already registered");
            return Err(AppError::Conflict(USERNAME_TAKEN.into()));
        }
        user.password = verifier.stored_form(&user.password);
        let id = store::insert_user(pool, &user).await?;
        tracing::info!(user_id = id, username = %user.username, "user_registered");
        Ok(RegisterResponse {
            message: "User registered",
        })
    }

    /// Check credentials. Unknown user, missing password and mismatch all answer the same way.
    pub async fn login(
        pool: &SqlitePool,
        verifier: &dyn CredentialVerifier,
        username: &str,
        password: Option<&str>,
    ) -> Result<LoginResponse, AppError> {
        let user = store::find_user_by_username(pool, username)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.into()))?;
        match password {
            Some(supplied) if verifier.verify(&user.password, supplied) => {
                tracing::info!(user_id = user.id, username = %user.username, "user_logged_in");
                Ok(LoginResponse {
                    message: "Login successful",
                    username: user.username,
                })
            }
            _ => {
                tracing::debug!(username = %username, "login rejected");
                Err(AppError::Unauthorized(INVALID_CREDENTIALS.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn pool() -> SqlitePool {
        let pool = store::connect_in_memory().await.unwrap();
        store::ensure_tables(&pool).await.unwrap();
        pool
    }

    fn register_req(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: Some(username.into()),
            password: Some(password.into()),
            location: Some("Ludhiana".into()),
        }
    }

    #[tokio::test]
    async fn second_registration_conflicts() {
        let pool = pool().await;
        let req = register_req("gurpreet", "kheti123");
        AuthService::register(&pool, &PlaintextVerifier, &req).await.unwrap();
        let err = AuthService::register(&pool, &PlaintextVerifier, &req).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(ref m) if m == USERNAME_TAKEN));
    }

    #[tokio::test]
    async fn usernames_are_case_sensitive() {
        let pool = pool().await;
        AuthService::register(&pool, &PlaintextVerifier, &register_req("Meena", "a")).await.unwrap();
        assert!(AuthService::register(&pool, &PlaintextVerifier, &register_req("meena", "b")).await.is_ok());
    }

    #[tokio::test]
    async fn login_checks_password() {
        let pool = pool().await;
        AuthService::register(&pool, &PlaintextVerifier, &register_req("gurpreet", "kheti123"))
            .await
            .unwrap();

        let ok = AuthService::login(&pool, &PlaintextVerifier, "gurpreet", Some("kheti123"))
            .await
            .unwrap();
        assert_eq!(
            ok,
            LoginResponse {
                message: "Login successful",
                username: "gurpreet".into()
            }
        );

        for bad in [Some("wrong"), None] {
            let err = AuthService::login(&pool, &PlaintextVerifier, "gurpreet", bad).await.unwrap_err();
            assert!(matches!(err, AppError::Unauthorized(_)));
        }
    }

    #[tokio::test]
    async fn unknown_user_is_unauthorized() {
        let pool = pool().await;
        let err = AuthService::login(&pool, &PlaintextVerifier, "nobody", Some("x")).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    struct ReversingVerifier;

    impl CredentialVerifier for ReversingVerifier {
        fn stored_form(&self, password: &str) -> String {
            password.chars().rev().collect()
        }

        fn verify(&self, stored: &str, supplied: &str) -> bool {
            self.stored_form(supplied) == stored
        }
    }

    #[tokio::test]
    async fn verifier_controls_stored_form() {
        let pool = pool().await;
        AuthService::register(&pool, &ReversingVerifier, &register_req("asha", "abc")).await.unwrap();
        let stored = store::find_user_by_username(&pool, "asha").await.unwrap().unwrap();
        assert_eq!(stored.password, "cba");
        assert!(AuthService::login(&pool, &ReversingVerifier, "asha", Some("abc")).await.is_ok());
    }
}
