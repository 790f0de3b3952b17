//! Short code resolution with click accounting.

use std::sync::Arc;

use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::is_valid_code;
use serde_json::json;

/// Resolves short codes to their original URLs, counting one click per
/// successful resolution.
pub struct RedirectService<R: LinkRepository> {
    repository: Arc<R>,
}

impl<R: LinkRepository> RedirectService<R> {
    /// Creates a new redirect service.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Increments the click counter of `code` and returns its original URL.
    ///
    /// The increment and the lookup are a single store statement, so
    /// concurrent resolutions of the same code never lose a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code. Tokens that
    /// cannot be a short code are rejected without a store round trip.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
            return Err(not_found(code));
        }

        match self.repository.increment_and_fetch(code).await? {
            Some(url) => {
                metrics::counter!("redirects_total", "outcome" => "found").increment(1);
                Ok(url)
            }
            None => {
                metrics::counter!("redirects_total", "outcome" => "not_found").increment(1);
                Err(not_found(code))
            }
        }
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": code }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    #[tokio::test]
    async fn test_resolve_success() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_and_fetch()
            .withf(|code| code == "aB3xY9")
            .times(1)
            .returning(|_| Ok(Some("https://example.com/a".to_string())));

        let service = RedirectService::new(Arc::new(mock_repo));

        let url = service.resolve("aB3xY9").await.unwrap();
        assert_eq!(url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_resolve_unknown_code() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_and_fetch()
            .times(1)
            .returning(|_| Ok(None));

        let service = RedirectService::new(Arc::new(mock_repo));

        let err = service.resolve("zzzzzz").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "Short URL not found");
    }

    #[tokio::test]
    async fn test_resolve_malformed_code_skips_store() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_increment_and_fetch().times(0);

        let service = RedirectService::new(Arc::new(mock_repo));

        for code in ["", "abc", "abcdefg", "ab-cd_", "héllo1", "favicon.ico"] {
            let err = service.resolve(code).await.unwrap_err();
            assert!(matches!(err, AppError::NotFound { .. }), "code: {code:?}");
        }
    }

    #[tokio::test]
    async fn test_resolve_propagates_store_errors() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo
            .expect_increment_and_fetch()
            .times(1)
            .returning(|_| Err(AppError::unavailable("Database unavailable", json!({}))));

        let service = RedirectService::new(Arc::new(mock_repo));

        let err = service.resolve("aB3xY9").await.unwrap_err();
        assert!(matches!(err, AppError::Unavailable { .. }));
    }
}
