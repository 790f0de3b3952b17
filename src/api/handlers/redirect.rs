//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::deadline::with_deadline;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Response
///
/// `301 Moved Permanently` with a `Location` header.
///
/// # Errors
///
/// - 404 Not Found: unknown or malformed code (no click is counted)
/// - 503 Service Unavailable: deadline expired or database busy
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = with_deadline(
        "redirect",
        state.timeouts.redirect,
        state.redirect_service.resolve(&code),
    )
    .await?;

    permanent_redirect(&original_url)
}

/// Builds a `301 Moved Permanently` response.
///
/// axum's `Redirect::permanent` answers with 308, which is not what clients
/// of this service expect.
pub fn permanent_redirect(location: &str) -> Result<Response, AppError> {
    let location = HeaderValue::try_from(location).map_err(|e| {
        tracing::error!(error = %e, "stored URL is not a valid Location header");
        AppError::internal("Server error", json!({}))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_redirect() {
        let response = permanent_redirect("https://example.com/a?b=c").unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "https://example.com/a?b=c"
        );
    }

    #[test]
    fn test_permanent_redirect_rejects_control_characters() {
        let err = permanent_redirect("https://example.com/\n").unwrap_err();
        assert!(matches!(err, AppError::Internal { .. }));
    }
}
