//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::HealthResponse;
use crate::state::AppState;
use crate::utils::deadline::with_deadline;

/// Reports service health together with the link and click totals.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: database reachable
/// - **503 Service Unavailable**: database unreachable or too slow
///
/// # Response
///
/// ```json
/// {
///   "status": "OK",
///   "timestamp": "2025-01-01T00:00:00Z",
///   "totalLinks": 3,
///   "totalClicks": 15
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let totals = with_deadline(
        "health",
        state.timeouts.stats,
        state.stats_service.totals(),
    )
    .await;

    match totals {
        Ok(totals) => Ok(Json(HealthResponse {
            status: "OK".to_string(),
            timestamp: Utc::now(),
            total_links: Some(totals.total_links),
            total_clicks: Some(totals.total_clicks),
        })),
        Err(e) => {
            tracing::warn!(error = %e, "health check failed");
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable".to_string(),
                    timestamp: Utc::now(),
                    total_links: None,
                    total_clicks: None,
                }),
            ))
        }
    }
}
