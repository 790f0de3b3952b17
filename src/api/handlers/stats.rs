//! Handler for aggregate statistics.

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, header},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::deadline::with_deadline;

/// Returns totals, per-domain counts and the most clicked links.
///
/// # Endpoint
///
/// `GET /stats`
///
/// # Response
///
/// ```json
/// {
///   "totalClicks": 15,
///   "totalLinks": 3,
///   "clicksPerDomain": { "s.example.com": 15 },
///   "linksPerDomain": { "s.example.com": 3 },
///   "topUrls": [
///     {
///       "url": "https://example.com",
///       "clicks": 9,
///       "shortCode": "aB3xY9",
///       "createdAt": "2025-01-01T00:00:00Z"
///     }
///   ]
/// }
/// ```
///
/// Responses are cacheable for 60 seconds.
pub async fn stats_handler(
    State(state): State<AppState>,
) -> Result<([(header::HeaderName, HeaderValue); 1], Json<StatsResponse>), AppError> {
    let stats = with_deadline(
        "stats",
        state.timeouts.stats,
        state.stats_service.snapshot(),
    )
    .await?;

    Ok((
        [(
            header::CACHE_CONTROL,
            HeaderValue::from_static("public, max-age=60"),
        )],
        Json(StatsResponse::from(stats)),
    ))
}
