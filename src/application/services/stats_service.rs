//! Read-side statistics service.

use std::sync::Arc;

use crate::domain::entities::{LinkTotals, Stats};
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Number of links reported in the top list.
pub const TOP_LINKS_LIMIT: i64 = 3;

/// Service computing aggregate statistics over all links.
///
/// Results are advisory and may trail concurrent writes.
pub struct StatsService<R: StatsRepository> {
    repository: Arc<R>,
}

impl<R: StatsRepository> StatsService<R> {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Computes totals, per-domain breakdowns and the top
    /// [`TOP_LINKS_LIMIT`] links by clicks.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] or [`AppError::Unavailable`] on database errors.
    #[tracing::instrument(skip(self))]
    pub async fn snapshot(&self) -> Result<Stats, AppError> {
        let aggregate = self.repository.aggregate(TOP_LINKS_LIMIT).await?;
        Ok(Stats::from(aggregate))
    }

    /// Returns link and click totals only.
    pub async fn totals(&self) -> Result<LinkTotals, AppError> {
        self.repository.totals().await
    }
}
