//! SQLite implementation of the link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::{FromRow, Sqlite, SqlitePool, Transaction};
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::{LinkRepository, LinkTransaction};
use crate::error::{AppError, map_sqlx_error};

const SELECT_EXISTS: &str = "SELECT EXISTS(SELECT 1 FROM links WHERE code = ?)";

const INSERT_LINK: &str = r#"
    INSERT INTO links (code, original_url, domain, created_at)
    VALUES (?, ?, ?, ?)
    RETURNING id, code, original_url, domain, created_at, clicks
"#;

#[derive(Debug, FromRow)]
struct LinkRow {
    id: i64,
    code: String,
    original_url: String,
    domain: String,
    created_at: DateTime<Utc>,
    clicks: i64,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.code, r.original_url, r.domain, r.created_at, r.clicks)
    }
}

/// SQLite repository for link storage and click accounting.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
}

impl SqliteLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(SELECT_EXISTS)
            .bind(code)
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error("links.exists", e))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(INSERT_LINK)
            .bind(&new_link.code)
            .bind(&new_link.original_url)
            .bind(&new_link.domain)
            .bind(Utc::now())
            .fetch_one(self.pool.as_ref())
            .await
            .map_err(|e| map_sqlx_error("links.insert", e))?;

        Ok(row.into())
    }

    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            r#"
            UPDATE links
            SET clicks = clicks + 1
            WHERE code = ?
            RETURNING original_url
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("links.increment_and_fetch", e))
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, code, original_url, domain, created_at, clicks
            FROM links
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| map_sqlx_error("links.find_by_code", e))?;

        Ok(row.map(Link::from))
    }

    async fn begin(&self) -> Result<Box<dyn LinkTransaction>, AppError> {
        // IMMEDIATE takes the write lock up front; a deferred transaction
        // would fail with SQLITE_BUSY when upgrading from read to write.
        let tx = self
            .pool
            .begin_with("BEGIN IMMEDIATE")
            .await
            .map_err(|e| map_sqlx_error("links.begin", e))?;

        Ok(Box::new(SqliteLinkTransaction { tx: Some(tx) }))
    }
}

/// Allocation transaction over a pooled SQLite connection.
///
/// The connection goes back to the pool when the transaction finishes or is
/// dropped; sqlx rolls back unfinished transactions on drop.
pub struct SqliteLinkTransaction {
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqliteLinkTransaction {
    fn open(&mut self) -> Result<&mut Transaction<'static, Sqlite>, AppError> {
        self.tx.as_mut().ok_or_else(|| {
            tracing::error!("allocation transaction used after it finished");
            AppError::internal("Database error", json!({}))
        })
    }
}

#[async_trait]
impl LinkTransaction for SqliteLinkTransaction {
    async fn exists(&mut self, code: &str) -> Result<bool, AppError> {
        let tx = self.open()?;

        sqlx::query_scalar::<_, bool>(SELECT_EXISTS)
            .bind(code)
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("links.tx.exists", e))
    }

    async fn insert(&mut self, new_link: NewLink) -> Result<Link, AppError> {
        let tx = self.open()?;

        let row = sqlx::query_as::<_, LinkRow>(INSERT_LINK)
            .bind(&new_link.code)
            .bind(&new_link.original_url)
            .bind(&new_link.domain)
            .bind(Utc::now())
            .fetch_one(&mut **tx)
            .await
            .map_err(|e| map_sqlx_error("links.tx.insert", e))?;

        Ok(row.into())
    }

    async fn commit(&mut self) -> Result<(), AppError> {
        match self.tx.take() {
            Some(tx) => tx
                .commit()
                .await
                .map_err(|e| map_sqlx_error("links.tx.commit", e)),
            None => Err(AppError::internal("Database error", json!({}))),
        }
    }

    async fn rollback(&mut self) -> Result<(), AppError> {
        match self.tx.take() {
            Some(tx) => tx
                .rollback()
                .await
                .map_err(|e| map_sqlx_error("links.tx.rollback", e)),
            None => Ok(()),
        }
    }
}
