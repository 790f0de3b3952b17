//! Repository traits for the link table.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Durable store of links keyed by short code.
///
/// Uniqueness of `code` is enforced by the backing table, not by callers
/// checking [`LinkRepository::exists`] first.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_link.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true if a link with `code` exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] or [`AppError::Unavailable`] on database errors.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts a link with `clicks = 0` and `created_at = now`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Increments the click counter of `code` and returns its original URL,
    /// as one statement.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if the link exists (counter incremented)
    /// - `Ok(None)` if it does not (nothing mutated)
    async fn increment_and_fetch(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Looks up a link without counting a click.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Opens a write transaction for allocation.
    ///
    /// The transaction holds the store's write lock from the start, so a
    /// concurrent allocator cannot insert between an existence check and
    /// the insert that follows it.
    async fn begin(&self) -> Result<Box<dyn LinkTransaction>, AppError>;
}

/// An open allocation transaction.
///
/// Dropping it without calling [`LinkTransaction::commit`] rolls it back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkTransaction: Send {
    async fn exists(&mut self, code: &str) -> Result<bool, AppError>;

    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the code is already taken. The
    /// transaction stays usable afterwards.
    async fn insert(&mut self, new_link: NewLink) -> Result<Link, AppError>;

    async fn commit(&mut self) -> Result<(), AppError>;

    async fn rollback(&mut self) -> Result<(), AppError>;
}
