//! SQLite implementation of the statistics repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use std::sync::Arc;

use crate::domain::entities::{DomainStats, LinkAggregate, LinkTotals, TopLink};
use crate::domain::repositories::StatsRepository;
use crate::error::{AppError, map_sqlx_error};

const SELECT_TOTALS: &str = "SELECT COUNT(*), COALESCE(SUM(clicks), 0) FROM links";

#[derive(Debug, FromRow)]
struct DomainRow {
    domain: String,
    clicks: i64,
    links: i64,
}

#[derive(Debug, FromRow)]
struct TopLinkRow {
    code: String,
    original_url: String,
    clicks: i64,
    created_at: DateTime<Utc>,
}

/// SQLite repository for aggregate link statistics.
///
/// All reads for one snapshot run inside a single read transaction so the
/// totals, per-domain counts and top list agree with each other.
pub struct SqliteStatsRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteStatsRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl StatsRepository for SqliteStatsRepository {
    async fn totals(&self) -> Result<LinkTotals, AppError> {
        let (total_links, total_clicks) = sqlx::query_as::<_, (i64, i64)>(SELECT_TOTALS)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error("stats.totals", e))?;

        Ok(LinkTotals {
            total_links,
            total_clicks,
        })
    }

    async fn aggregate(&self, top_limit: i64) -> Result<LinkAggregate, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("stats.begin", e))?;

        let (total_links, total_clicks) = sqlx::query_as::<_, (i64, i64)>(SELECT_TOTALS)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("stats.totals", e))?;

        let domains = sqlx::query_as::<_, DomainRow>(
            r#"
            SELECT domain, COALESCE(SUM(clicks), 0) AS clicks, COUNT(*) AS links
            FROM links
            GROUP BY domain
            ORDER BY domain
            "#,
        )
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("stats.domains", e))?;

        let top_links = sqlx::query_as::<_, TopLinkRow>(
            r#"
            SELECT code, original_url, clicks, created_at
            FROM links
            ORDER BY clicks DESC, id ASC
            LIMIT ?
            "#,
        )
        .bind(top_limit)
        .fetch_all(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("stats.top_links", e))?;

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("stats.commit", e))?;

        Ok(LinkAggregate {
            totals: LinkTotals {
                total_links,
                total_clicks,
            },
            domains: domains
                .into_iter()
                .map(|r| DomainStats {
                    domain: r.domain,
                    clicks: r.clicks,
                    links: r.links,
                })
                .collect(),
            top_links: top_links
                .into_iter()
                .map(|r| TopLink {
                    code: r.code,
                    original_url: r.original_url,
                    clicks: r.clicks,
                    created_at: r.created_at,
                })
                .collect(),
        })
    }
}
