//! `SQLite` connection pool setup, startup retry, and migration runner.

use std::str::FromStr;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;

use crate::error::StorageError;

/// Number of connection attempts before startup fails.
const CONNECT_ATTEMPTS: u32 = 5;

/// Delay before the first reconnection attempt; doubles after each miss.
const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(500);

/// Configuration for the `SQLite` storage adapter.
pub struct Config {
    /// `SQLite` connection URL (e.g. `sqlite:depot.db` or `sqlite::memory:`).
    pub database_url: String,
}

impl Config {
    /// Read configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `DEPOT_DATABASE_URL` is not set.
    pub fn from_env() -> Result<Self, std::env::VarError> {
        Ok(Self {
            database_url: std::env::var("DEPOT_DATABASE_URL")?,
        })
    }

    /// Build a [`Database`] from this configuration.
    ///
    /// Creates the connection pool (retrying while the database is coming
    /// up), creates the database file if missing, and runs all pending
    /// migrations.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the connection attempts are exhausted or
    /// migrations fail.
    pub async fn build(self) -> Result<Database, StorageError> {
        Database::initialize(&self.database_url).await
    }
}

/// Holds the `SQLite` connection pool and provides access to it.
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database and run migrations.
    async fn initialize(database_url: &str) -> Result<Self, StorageError> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        let pool = Self::connect_with_retry(options).await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Probe the database until it answers, with a bounded number of
    /// attempts and an exponentially growing delay between them.
    async fn connect_with_retry(options: SqliteConnectOptions) -> Result<SqlitePool, StorageError> {
        let mut delay = INITIAL_RETRY_DELAY;
        let mut attempt = 1;
        loop {
            match SqlitePool::connect_with(options.clone()).await {
                Ok(pool) => return Ok(pool),
                Err(err) if attempt < CONNECT_ATTEMPTS => {
                    tracing::warn!(attempt, ?delay, error = %err, "database not ready, retrying");
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }

    /// Borrow the underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
