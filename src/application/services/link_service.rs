//! Short code allocation service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink, short_url};
use crate::domain::repositories::{LinkRepository, LinkTransaction};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_reserved_code};
use serde_json::json;

/// Default cap on generate-and-check rounds per allocation.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 32;

const ACCEPTED_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Service for allocating unique short codes.
///
/// The whole generate, check and insert sequence of one allocation runs in a
/// single store transaction, so a code is never handed out twice and a failed
/// allocation leaves no row behind.
pub struct LinkService<R: LinkRepository, G: CodeGenerator> {
    repository: Arc<R>,
    generator: G,
    max_attempts: u32,
}

impl<R: LinkRepository, G: CodeGenerator> LinkService<R, G> {
    /// Creates a new link service.
    pub fn new(repository: Arc<R>, generator: G, max_attempts: u32) -> Self {
        Self {
            repository,
            generator,
            max_attempts: max_attempts.max(1),
        }
    }

    /// Allocates a fresh short code for `original_url` served under `domain`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL does not start with
    /// `http://` or `https://`. Nothing is read from or written to the store
    /// in that case.
    ///
    /// Returns [`AppError::Internal`] if no free code was found within the
    /// attempt cap, and [`AppError::Internal`] or [`AppError::Unavailable`] on
    /// store errors. The transaction is rolled back on every error path.
    #[tracing::instrument(skip(self, original_url))]
    pub async fn allocate(&self, original_url: &str, domain: &str) -> Result<Link, AppError> {
        if !has_accepted_scheme(original_url) {
            return Err(AppError::bad_request(
                "Invalid URL format",
                json!({ "reason": "URL must start with http:// or https://" }),
            ));
        }

        let mut tx = self.repository.begin().await?;

        match self.allocate_in(&mut *tx, original_url, domain).await {
            Ok(link) => {
                metrics::counter!("links_allocated_total").increment(1);
                tracing::debug!(code = %link.code, "short code allocated");
                Ok(link)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    tracing::warn!(error = %rollback_err, "allocation rollback failed");
                }
                Err(e)
            }
        }
    }

    /// Builds the public URL of a short code.
    pub fn short_url(&self, domain: &str, code: &str) -> String {
        short_url(domain, code)
    }

    async fn allocate_in(
        &self,
        tx: &mut dyn LinkTransaction,
        original_url: &str,
        domain: &str,
    ) -> Result<Link, AppError> {
        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate()?;

            if is_reserved_code(&code) || tx.exists(&code).await? {
                record_collision(attempt);
                continue;
            }

            let new_link = NewLink {
                code,
                original_url: original_url.to_string(),
                domain: domain.to_string(),
            };

            match tx.insert(new_link).await {
                Ok(link) => {
                    tx.commit().await?;
                    return Ok(link);
                }
                Err(AppError::Conflict { .. }) => record_collision(attempt),
                Err(e) => return Err(e),
            }
        }

        tracing::error!(
            operation = "links.allocate",
            attempts = self.max_attempts,
            "short code space exhausted"
        );

        Err(AppError::internal(
            "Failed to allocate a unique short code",
            json!({}),
        ))
    }
}

fn has_accepted_scheme(url: &str) -> bool {
    ACCEPTED_SCHEMES.iter().any(|scheme| url.starts_with(scheme))
}

fn record_collision(attempt: u32) {
    metrics::counter!("allocation_collisions_total").increment(1);
    tracing::debug!(attempt, "short code collision, regenerating");
}
