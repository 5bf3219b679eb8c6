//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain expects to talk to persistence
//! adapters; driving ports are the use-case surface inbound adapters call.
//! Each trait exposes strongly typed errors so adapters map their failures
//! into predictable variants instead of returning `anyhow::Result`.

use async_trait::async_trait;
use thiserror::Error as ThisError;
use uuid::Uuid;

use super::auth::{LoginCredentials, SignupCredentials};
use super::error::Error;
use super::service_record::{ServiceRecord, ServiceRecordInput, ServiceRecordPatch};
use super::user::{Email, User, UserAccount, UserId};

/// Persistence errors raised by [`ServiceRecordRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ServiceRecordPersistenceError {
    /// Repository connection could not be established.
    #[error("service record repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("service record repository query failed: {message}")]
    Query { message: String },
}

impl ServiceRecordPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Persistence errors raised by [`UserRepository`] adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum UserPersistenceError {
    /// Repository connection could not be established.
    #[error("user repository connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("user repository query failed: {message}")]
    Query { message: String },
    /// Unique email constraint violated on insert.
    #[error("email {email} is already registered")]
    DuplicateEmail { email: String },
}

impl UserPersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Helper for duplicate-email conflicts.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Persistence port for service records.
///
/// Adapters are thin: ordering (`created_at` descending) is part of the
/// contract so the service never re-sorts, and `delete` reports whether a
/// row was actually removed so racing deletes resolve to NotFound.
#[async_trait]
pub trait ServiceRecordRepository: Send + Sync {
    /// All records owned by `owner`, most recently created first.
    async fn list_for_user(
        &self,
        owner: &UserId,
    ) -> Result<Vec<ServiceRecord>, ServiceRecordPersistenceError>;

    /// Fetch a record by identifier regardless of owner.
    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<ServiceRecord>, ServiceRecordPersistenceError>;

    /// Persist a newly created record.
    async fn insert(&self, record: &ServiceRecord)
        -> Result<(), ServiceRecordPersistenceError>;

    /// Overwrite an existing record in place.
    async fn update(&self, record: &ServiceRecord)
        -> Result<(), ServiceRecordPersistenceError>;

    /// Remove a record, returning whether a row existed.
    async fn delete(&self, id: Uuid) -> Result<bool, ServiceRecordPersistenceError>;
}

/// Persistence port for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account; fails with `DuplicateEmail` when taken.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Fetch an account (user + password hash) by email.
    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Fetch the public user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;
}

/// Driving port for the service record use-cases.
///
/// ## Preconditions
/// Callers hand in an `owner` id already resolved by the authentication
/// layer; implementations trust it and never re-derive identity.
#[async_trait]
pub trait ServiceRecords: Send + Sync {
    /// All records owned by `owner`, newest first. Empty is not an error.
    async fn list(&self, owner: &UserId) -> Result<Vec<ServiceRecord>, Error>;

    /// A single owned record; NotFound before Forbidden.
    async fn get(&self, owner: &UserId, record_id: Uuid) -> Result<ServiceRecord, Error>;

    /// Validate and persist a new record owned by `owner`.
    async fn create(
        &self,
        owner: &UserId,
        input: ServiceRecordInput,
    ) -> Result<ServiceRecord, Error>;

    /// Apply a partial update to an owned record and return the result.
    async fn update(
        &self,
        owner: &UserId,
        record_id: Uuid,
        patch: ServiceRecordPatch,
    ) -> Result<ServiceRecord, Error>;

    /// Permanently remove an owned record.
    async fn delete(&self, owner: &UserId, record_id: Uuid) -> Result<(), Error>;
}

/// Driving port for email/password authentication.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new account and return its public user.
    async fn sign_up(&self, credentials: SignupCredentials) -> Result<User, Error>;

    /// Verify credentials and return the matching user.
    async fn sign_in(&self, credentials: LoginCredentials) -> Result<User, Error>;

    /// Resolve a session's stored user id back to a user, if still present.
    async fn fetch_user(&self, id: &UserId) -> Result<Option<User>, Error>;
}
