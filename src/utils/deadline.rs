//! Per-request deadlines for store-bound operations.

use std::future::Future;
use std::time::Duration;

use serde_json::json;

use crate::error::AppError;

/// Runs `future` with an upper bound of `limit`.
///
/// On expiry the future is dropped, which rolls back any open transaction
/// and returns its connection to the pool, and a retryable
/// [`AppError::Unavailable`] is returned.
pub async fn with_deadline<T, F>(
    operation: &'static str,
    limit: Duration,
    future: F,
) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, future).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "operation timed out"
            );
            metrics::counter!("operation_timeouts_total", "operation" => operation).increment(1);
            Err(AppError::unavailable("Request timed out, retry later", json!({})))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_completes_within_deadline() {
        let result = with_deadline("test.fast", Duration::from_secs(1), async {
            Ok::<_, AppError>(7)
        })
        .await;

        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_inner_error_passes_through() {
        let result: Result<(), AppError> =
            with_deadline("test.error", Duration::from_secs(1), async {
                Err(AppError::not_found("missing", json!({})))
            })
            .await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_expired_deadline_is_unavailable() {
        let result: Result<(), AppError> = with_deadline(
            "test.slow",
            Duration::from_millis(10),
            std::future::pending(),
        )
        .await;

        assert!(matches!(result.unwrap_err(), AppError::Unavailable { .. }));
    }
}
