//! PostgreSQL-backed `UserRepository` implementation using Diesel.
//!
//! Translates between Diesel rows and domain accounts; the unique index on
//! `users.email` is surfaced as the port's `DuplicateEmail` variant so the
//! auth service can report it without inspecting driver errors.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Email, User, UserAccount, UserId};

use super::models::{NewUserRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to domain persistence errors.
fn map_pool_error(error: PoolError) -> UserPersistenceError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            UserPersistenceError::connection(message)
        }
    }
}

/// Map Diesel errors to domain persistence errors, folding unique-violation
/// failures on the email index into `DuplicateEmail`.
fn map_diesel_error(error: diesel::result::Error, email: &str) -> UserPersistenceError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            debug!(message = info.message(), "unique violation on users insert");
            return UserPersistenceError::duplicate_email(email);
        }
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            UserPersistenceError::connection("database connection error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}

/// Convert a database row to a domain account.
fn row_to_account(row: UserRow) -> Result<UserAccount, UserPersistenceError> {
    let email = Email::parse(&row.email).map_err(|err| {
        UserPersistenceError::query(format!("corrupt email in user row {}: {err}", row.id))
    })?;
    Ok(UserAccount {
        user: User {
            id: UserId::from_uuid(row.id),
            email,
            name: row.name,
            email_verified: row.email_verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        },
        password_hash: row.password_hash,
    })
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user = &account.user;
        let row = NewUserRow {
            id: *user.id.as_uuid(),
            email: user.email.as_str(),
            name: &user.name,
            email_verified: user.email_verified,
            password_hash: &account.password_hash,
            created_at: user.created_at,
            updated_at: user.updated_at,
        };

        diesel::insert_into(users::table)
            .values(row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_diesel_error(err, user.email.as_str()))
    }

    async fn find_by_email(
        &self,
        email: &Email,
    ) -> Result<Option<UserAccount>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, email.as_str()))?;

        row.map(row_to_account).transpose()
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| map_diesel_error(err, ""))?;

        row.map(|row| row_to_account(row).map(|account| account.user))
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use chrono::Utc;
    use rstest::rstest;
    use uuid::Uuid;

    fn sample_row() -> UserRow {
        let now = Utc::now();
        UserRow {
            id: Uuid::new_v4(),
            email: "tech@example.com".into(),
            name: "Test Tech".into(),
            email_verified: false,
            password_hash: "$argon2id$stub".into(),
            created_at: now,
            updated_at: now,
        }
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let repo_err = map_pool_error(PoolError::checkout("connection refused"));
        assert!(matches!(repo_err, UserPersistenceError::Connection { .. }));
    }

    #[rstest]
    fn generic_diesel_error_maps_to_query_error() {
        let repo_err = map_diesel_error(diesel::result::Error::NotFound, "tech@example.com");
        assert!(matches!(repo_err, UserPersistenceError::Query { .. }));
    }

    #[rstest]
    fn row_round_trips_to_domain() {
        let row = sample_row();
        let expected_id = row.id;
        let account = row_to_account(row).expect("valid row converts");
        assert_eq!(account.user.id, UserId::from_uuid(expected_id));
        assert_eq!(account.user.email.as_str(), "tech@example.com");
        assert_eq!(account.password_hash, "$argon2id$stub");
    }

    #[rstest]
    fn corrupt_email_is_a_query_error() {
        let row = UserRow {
            email: "not-an-email".into(),
            ..sample_row()
        };
        let err = row_to_account(row).expect_err("corrupt email rejected");
        assert!(matches!(err, UserPersistenceError::Query { .. }));
    }
}
