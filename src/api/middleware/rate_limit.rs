//! Per-client rate limiting using the token bucket algorithm.

use anyhow::{Context, Result};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use std::sync::Arc;
use tower_governor::{
    GovernorLayer, governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor,
};

pub type RateLimitLayer =
    GovernorLayer<SmartIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Creates a rate limiter allowing `per_minute` requests per client, with a
/// burst of the same size.
///
/// Requests exceeding the limit receive `429 Too Many Requests`.
///
/// # Key Extraction
///
/// The client IP is read from `X-Forwarded-For`, `X-Real-IP` or `Forwarded`
/// and falls back to the socket peer address, so the server must be run
/// with connect info.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/shorten", post(shorten_handler))
///     .layer(rate_limit::per_minute(10)?);
/// ```
///
/// # Errors
///
/// Returns an error if `per_minute` is 0.
pub fn per_minute(per_minute: u32) -> Result<RateLimitLayer> {
    anyhow::ensure!(per_minute > 0, "rate limit must be at least 1 request per minute");

    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(SmartIpKeyExtractor)
            .per_millisecond(replenish_interval_ms(per_minute))
            .burst_size(per_minute)
            .finish()
            .context("invalid rate limiter configuration")?,
    );

    Ok(GovernorLayer::new(governor_conf))
}

/// Milliseconds between token refills for a per-minute quota.
fn replenish_interval_ms(per_minute: u32) -> u64 {
    (60_000 / u64::from(per_minute)).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replenish_interval() {
        assert_eq!(replenish_interval_ms(100), 600);
        assert_eq!(replenish_interval_ms(10), 6000);
        assert_eq!(replenish_interval_ms(1), 60_000);
        assert_eq!(replenish_interval_ms(1_000_000), 1);
    }

    #[test]
    fn test_zero_quota_rejected() {
        assert!(per_minute(0).is_err());
        assert!(per_minute(10).is_ok());
    }
}
