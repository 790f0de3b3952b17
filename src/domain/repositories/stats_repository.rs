//! Repository trait for read-side statistics.

use crate::domain::entities::{LinkAggregate, LinkTotals};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only aggregate queries over the link table.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteStatsRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_stats.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Counts links and sums clicks. Click total is 0 on an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] or [`AppError::Unavailable`] on database errors.
    async fn totals(&self) -> Result<LinkTotals, AppError>;

    /// Reads totals, per-domain counts and the `top_limit` most clicked
    /// links (ties in insertion order) from one consistent snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] or [`AppError::Unavailable`] on database errors.
    async fn aggregate(&self, top_limit: i64) -> Result<LinkAggregate, AppError>;
}
