//! Email/password authentication service.
//!
//! Implements the [`AuthService`] driving port over a [`UserRepository`]
//! with argon2id password hashing. Session issuance stays in the inbound
//! adapter; this service only establishes and verifies identities.

use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tracing::{error, warn};

use super::auth::{LoginCredentials, SignupCredentials};
use super::error::Error;
use super::ports::{AuthService, UserPersistenceError, UserRepository};
use super::user::{User, UserAccount, UserId};

/// Message returned for any credential mismatch. Unknown email and wrong
/// password are indistinguishable so callers cannot probe for accounts.
const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Repository-backed implementation of the [`AuthService`] port.
#[derive(Clone)]
pub struct PasswordAuthService<R> {
    users: Arc<R>,
}

impl<R> PasswordAuthService<R> {
    /// Create a new service over the given user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

fn map_repository_error(err: UserPersistenceError) -> Error {
    match err {
        UserPersistenceError::DuplicateEmail { .. } => {
            Error::invalid_request("An account with this email already exists")
                .with_details(json!({ "field": "email", "code": "email_taken" }))
        }
        other => {
            error!(error = %other, "user store failure");
            Error::internal("Internal server error")
        }
    }
}

fn hash_password(password: &str) -> Result<String, Error> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            error!(error = %err, "password hashing failed");
            Error::internal("Internal server error")
        })
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        // A corrupt hash means the row predates this scheme or was
        // tampered with; treat as mismatch rather than failing the request.
        warn!("stored password hash failed to parse");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

#[async_trait]
impl<R> AuthService for PasswordAuthService<R>
where
    R: UserRepository,
{
    async fn sign_up(&self, credentials: SignupCredentials) -> Result<User, Error> {
        let password_hash = hash_password(credentials.password())?;
        let user = User::new(
            UserId::random(),
            credentials.email().clone(),
            credentials.name(),
            Utc::now(),
        )
        .map_err(|err| Error::invalid_request(err.to_string()))?;

        let account = UserAccount {
            user: user.clone(),
            password_hash,
        };
        self.users
            .insert(&account)
            .await
            .map_err(map_repository_error)?;
        Ok(user)
    }

    async fn sign_in(&self, credentials: LoginCredentials) -> Result<User, Error> {
        let account = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_CREDENTIALS))?;

        if !verify_password(credentials.password(), &account.password_hash) {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(account.user)
    }

    async fn fetch_user(&self, id: &UserId) -> Result<Option<User>, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_repository_error)
    }
}
