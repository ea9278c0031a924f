//! Listeners Club Storage
//!
//! `SQLite` persistence for the club catalog, member scores, favorites,
//! comments, personal collections and posts.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each feature owns its own queries and logic
//! - **Atomic Aggregates**: Score writes, album creation and deletion,
//!   entry-number repair and user deletion each run inside one
//!   `BEGIN IMMEDIATE` transaction
//! - **Entry Numbers**: Read and assigned under the write lock and guarded by
//!   a unique index, so concurrent creations can never share a number
//!
//! # Example
//!
//! ```rust,no_run
//! use club_storage::{LocalStorageContext, create_pool, run_migrations};
//! use club_core::{storage::StorageContext, AlbumSort};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://club.db").await?;
//! run_migrations(&pool).await?;
//!
//! let storage = LocalStorageContext::new(pool);
//! let albums = storage.list_albums(AlbumSort::default(), None).await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod albums;
pub mod comments;
pub mod favorites;
pub mod personal_albums;
pub mod posts;
pub mod scores;
pub mod users;

pub use context::LocalStorageContext;
pub use error::StorageError;

/// Storage handle used by the server
pub type Database = LocalStorageContext;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;
use sqlx::{Sqlite, Transaction};

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://club.db>`)
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(database_url, "Creating SQLite pool");

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}

/// Current time as a fixed-width UTC timestamp
///
/// Microsecond precision with a constant width keeps lexical order equal to
/// chronological order, which the listings rely on.
pub(crate) fn now_timestamp() -> String {
    chrono::Utc::now()
        .format("%Y-%m-%dT%H:%M:%S%.6fZ")
        .to_string()
}

/// Turn a unique-index violation into a `Duplicate` error
pub(crate) fn map_unique_violation(err: sqlx::Error, message: &str) -> club_core::ClubError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            club_core::ClubError::duplicate(message)
        }
        _ => err.into(),
    }
}

/// Begin a transaction holding the database write lock from the start
///
/// Read-then-write transactions opened with a plain `BEGIN` fail with
/// `SQLITE_BUSY` in WAL mode when another writer commits first; an immediate
/// transaction waits on the busy timeout instead.
pub(crate) async fn begin_write(
    pool: &SqlitePool,
) -> Result<Transaction<'static, Sqlite>, sqlx::Error> {
    pool.begin_with("BEGIN IMMEDIATE").await
}
