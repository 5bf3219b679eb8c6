//! Embedded schema migrations applied at startup.
//!
//! Migration SQL under `migrations/` is compiled into the binary so a
//! deployment never depends on the Diesel CLI being present. Runs over a
//! synchronous connection; it executes once before the server accepts
//! traffic.

use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// Could not connect to the database.
    #[error("failed to connect for migrations: {message}")]
    Connection { message: String },
    /// A migration failed to apply.
    #[error("failed to run migrations: {message}")]
    Apply { message: String },
}

/// Apply all pending migrations against the given database.
pub fn run_pending_migrations(database_url: &str) -> Result<(), MigrationError> {
    let mut conn =
        PgConnection::establish(database_url).map_err(|err| MigrationError::Connection {
            message: err.to_string(),
        })?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;

    for migration in &applied {
        info!(migration = %migration, "applied migration");
    }
    Ok(())
}
