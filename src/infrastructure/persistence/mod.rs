//! SQLite repository implementations and pool setup.
//!
//! Concrete implementations of domain repository traits using SQLx runtime
//! queries against a single SQLite database file.
//!
//! # Repositories
//!
//! - [`SqliteLinkRepository`] - Link storage, allocation transactions and click accounting
//! - [`SqliteStatsRepository`] - Aggregate statistics

pub mod sqlite_link_repository;
pub mod sqlite_stats_repository;

pub use sqlite_link_repository::{SqliteLinkRepository, SqliteLinkTransaction};
pub use sqlite_stats_repository::SqliteStatsRepository;

use std::str::FromStr;
use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;

/// Embedded schema migrations from `./migrations`.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Connection pool tuning.
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
    pub busy_timeout: Duration,
    pub max_lifetime: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 25,
            min_connections: 5,
            acquire_timeout: Duration::from_secs(3),
            busy_timeout: Duration::from_millis(5000),
            max_lifetime: Duration::from_secs(300),
        }
    }
}

/// Opens a pool on `database_url`, creating the database file if missing.
///
/// Connections run in WAL mode so redirects and stats reads do not block
/// behind an allocation holding the write lock.
pub async fn connect(database_url: &str, settings: &PoolSettings) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(settings.busy_timeout);

    let pool = SqlitePoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .acquire_timeout(settings.acquire_timeout)
        .max_lifetime(settings.max_lifetime)
        .connect_with(options)
        .await?;

    tracing::debug!(
        max_connections = settings.max_connections,
        min_connections = settings.min_connections,
        "SQLite pool opened"
    );

    Ok(pool)
}

/// Applies pending migrations.
pub async fn migrate(pool: &SqlitePool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await
}
