//! API route configuration.
//!
//! Route sets are split by rate limit tier; [`crate::routes::app_router`]
//! attaches the limiters and the rest of the middleware stack.

use crate::api::handlers::{health_handler, redirect_handler, shorten_handler, stats_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link creation, subject to the stricter per-client limit.
///
/// - `POST /shorten` - Allocate a short code
pub fn shorten_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_handler))
}

/// Read-side routes.
///
/// - `GET /stats`  - Aggregate statistics
/// - `GET /health` - Health check with totals
/// - `GET /{code}` - Short link redirect
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
}

/// All API routes without any middleware.
pub fn routes() -> Router<AppState> {
    Router::new().merge(shorten_routes()).merge(public_routes())
}
