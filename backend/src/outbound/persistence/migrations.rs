//! Embedded schema migrations applied at startup.

use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

/// Migrations compiled from the crate's `migrations/` directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while applying migrations.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    /// The database refused or dropped the connection.
    #[error("failed to connect for migrations: {0}")]
    Connect(#[from] diesel::ConnectionError),
    /// A migration script failed.
    #[error("failed to run migrations: {message}")]
    Run { message: String },
    /// The run did not finish in time.
    #[error("migrations did not finish within {timeout:?}")]
    TimedOut { timeout: Duration },
    /// The blocking task panicked or was cancelled.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// Apply all pending migrations, returning the versions that ran.
///
/// Blocking: call from `tokio::task::spawn_blocking` inside async code.
///
/// # Errors
///
/// Returns [`MigrationError::Connect`] when the database is unreachable and
/// [`MigrationError::Run`] when a migration fails.
pub fn apply_migrations(database_url: &str) -> Result<Vec<String>, MigrationError> {
    let mut connection = PgConnection::establish(database_url)?;
    let applied = connection
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| MigrationError::Run {
            message: error.to_string(),
        })?;
    Ok(applied.into_iter().map(|version| version.to_string()).collect())
}

/// Run [`apply_migrations`] on the blocking pool, giving up after `timeout`.
///
/// A database host that never answers would otherwise hold startup on the
/// connect call. The abandoned blocking task is left to finish on its own.
///
/// # Errors
///
/// Returns [`MigrationError::TimedOut`] when `timeout` elapses first, and
/// any error [`apply_migrations`] reports.
pub async fn apply_migrations_within(
    database_url: String,
    timeout: Duration,
) -> Result<Vec<String>, MigrationError> {
    run_blocking_within(timeout, move || apply_migrations(&database_url)).await
}

async fn run_blocking_within<T, F>(timeout: Duration, job: F) -> Result<T, MigrationError>
where
    F: FnOnce() -> Result<T, MigrationError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::time::timeout(timeout, tokio::task::spawn_blocking(job)).await {
        Ok(Ok(result)) => result,
        Ok(Err(join)) => Err(MigrationError::Task {
            message: join.to_string(),
        }),
        Err(_) => Err(MigrationError::TimedOut { timeout }),
    }
}
