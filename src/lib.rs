//! # snaplink
//!
//! A URL shortener built with Axum and SQLite: collision-free short code
//! allocation, atomic click accounting, and aggregate statistics.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core business entities and repository traits
//! - **Application Layer** ([`application`]) - Allocation, redirect and stats services
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite pool, migrations and repositories
//! - **API Layer** ([`api`]) - HTTP handlers, DTOs, and middleware
//!
//! ## Quick Start
//!
//! ```bash
//! export DATABASE_URL="sqlite://./urlshortener.db"
//!
//! # Migrations are applied on startup
//! cargo run
//!
//! curl -X POST localhost:8080/shorten \
//!   -H 'Content-Type: application/json' \
//!   -d '{"url":"https://example.com","domain":"s.example.com"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LinkService, RedirectService, StatsService};
    pub use crate::domain::entities::{Link, NewLink, Stats};
    pub use crate::error::AppError;
    pub use crate::state::{AppState, OperationTimeouts};
}
