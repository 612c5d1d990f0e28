pub mod todos;
pub mod users;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use crate::error::Result;

/// Database handle type (a pool is cheap to clone across handlers)
pub type Db = SqlitePool;

/// Open or create the SQLite database at the given path
///
/// Creates the parent directory and all required tables on first run.
pub async fn open_database(path: impl AsRef<Path>) -> Result<Db> {
    let path = path.as_ref();
    tracing::info!("Opening database at: {:?}", path);

    // Create parent directory if it doesn't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| {
                tracing::error!("Failed to create database directory: {}", e);
                sqlx::Error::Io(e)
            })?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await?;

    initialize(&pool).await?;

    tracing::info!("Database initialized successfully");

    Ok(pool)
}

/// Open a private in-memory database with the full schema
///
/// Every connection to `:memory:` is a separate database, so the pool is
/// pinned to one connection that is never recycled.
pub async fn open_in_memory() -> Result<Db> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    initialize(&pool).await?;

    Ok(pool)
}

/// Create the `users` and `todos` tables if they are absent
pub async fn initialize(pool: &Db) -> Result<()> {
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    tracing::info!("Migrations complete");
    Ok(())
}

/// Release every pooled connection
pub async fn close_database(pool: Db) {
    tracing::info!("Closing database connections");
    pool.close().await;
}

/// Whether a storage error is a UNIQUE constraint violation
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.is_unique_violation(),
        _ => false,
    }
}
