//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::deadline::with_deadline;

/// Allocates a short code for a URL.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "domain": "s.example.com"
/// }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "shortCode": "aB3xY9",
///   "shortUrl": "https://s.example.com/aB3xY9"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request: malformed body, empty domain, or a URL without an
///   `http://`/`https://` prefix
/// - 500 Internal Server Error: allocation failed
/// - 503 Service Unavailable: deadline expired or database busy
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(payload) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;

    payload.validate()?;

    let link = with_deadline(
        "shorten",
        state.timeouts.shorten,
        state.link_service.allocate(&payload.url, &payload.domain),
    )
    .await?;

    let short_url = state.link_service.short_url(&link.domain, &link.code);

    Ok(Json(ShortenResponse {
        short_code: link.code,
        short_url,
    }))
}
