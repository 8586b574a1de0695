//! SQLite connection pool wrapper for the storage crate.

use std::time::Duration;

use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use tracing::info;

/// Manages a single SQLite pool; creates the DB file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database file. `busy_timeout` bounds how long a statement
    /// waits on a locked database.
    pub async fn new(db_file_path: &str, busy_timeout: Duration) -> Result<Self, sqlx::Error> {
        info!(
            db_file_path = %db_file_path,
            busy_timeout_secs = busy_timeout.as_secs(),
            "Initializing SQLite pool"
        );

        let options = SqliteConnectOptions::new()
            .filename(db_file_path)
            .create_if_missing(true)
            .busy_timeout(busy_timeout);

        let pool = SqlitePool::connect_with(options).await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
