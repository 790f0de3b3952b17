//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorten` - Create a short link (10 requests/min per client by default)
//! - `GET  /stats`   - Aggregate statistics
//! - `GET  /health`  - Health check with totals
//! - `GET  /{code}`  - Short link redirect
//! - `GET  /`        - Redirect to `ROOT_REDIRECT_URL` when configured
//! - anything else   - Static files from `STATIC_DIR`
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Any origin
//! - **Compression** - gzip
//! - **Rate limiting** - Per-IP token bucket (100 requests/min by default)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::permanent_redirect;
use crate::api::middleware::{cors, rate_limit, tracing};
use crate::config::Config;
use crate::state::AppState;
use anyhow::Result;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::compression::CompressionLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware,
/// with trailing slashes trimmed before routing.
///
/// # Errors
///
/// Returns an error if a rate limit in `config` is invalid.
pub fn app_router(state: AppState, config: &Config) -> Result<NormalizePath<Router>> {
    let router = build_router(state, config)?;
    Ok(NormalizePathLayer::trim_trailing_slash().layer(router))
}

/// Routes and middleware without path normalization.
///
/// Rate limiting keys on the client IP, so requests must carry a forwarding
/// header or `ConnectInfo<SocketAddr>`.
///
/// # Errors
///
/// Returns an error if a rate limit in `config` is invalid.
pub fn build_router(state: AppState, config: &Config) -> Result<Router> {
    let shorten_router = api::routes::shorten_routes()
        .layer(rate_limit::per_minute(config.shorten_rate_limit_per_minute)?);

    let mut router = Router::new()
        .merge(shorten_router)
        .merge(api::routes::public_routes());

    if let Some(target) = config.root_redirect_url.clone() {
        router = router.route(
            "/",
            get(move || {
                let target = target.clone();
                async move { permanent_redirect(&target) }
            }),
        );
    }

    let router = router
        .fallback_service(ServeDir::new(&config.static_dir))
        .with_state(state)
        .layer(rate_limit::per_minute(config.rate_limit_per_minute)?)
        .layer(cors::layer())
        .layer(CompressionLayer::new())
        .layer(tracing::layer());

    Ok(router)
}
