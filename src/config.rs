//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Database location
//!
//! ```bash
//! export DATABASE_URL="sqlite://./urlshortener.db"
//! # or just the file path
//! export DB_PATH="/var/lib/snaplink/links.db"
//! ```
//!
//! If `DATABASE_URL` is not set it is built from `DB_PATH`, and falls back to
//! `sqlite://./urlshortener.db`.
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:8080`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `DB_MAX_CONNECTIONS` / `DB_MIN_CONNECTIONS` - Pool size (default: 25 / 5)
//! - `DB_ACQUIRE_TIMEOUT` - Pool acquire timeout in seconds (default: 3)
//! - `DB_BUSY_TIMEOUT_MS` - SQLite lock wait in milliseconds (default: 5000)
//! - `DB_MAX_LIFETIME` - Connection lifetime in seconds (default: 300)
//! - `SHORTEN_TIMEOUT_MS` / `REDIRECT_TIMEOUT_MS` / `STATS_TIMEOUT_MS` -
//!   Request deadlines (default: 3000 / 2000 / 5000)
//! - `ALLOCATION_MAX_ATTEMPTS` - Code generation rounds per allocation (default: 32)
//! - `RATE_LIMIT_PER_MINUTE` / `SHORTEN_RATE_LIMIT_PER_MINUTE` - Per-IP limits (default: 100 / 10)
//! - `STATIC_DIR` - Static files served for unmatched paths (default: `./static`)
//! - `ROOT_REDIRECT_URL` - Where `GET /` redirects to (unset: served from `STATIC_DIR`)
//! - `SHUTDOWN_TIMEOUT_SECS` - Drain deadline on shutdown (default: 30)

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::infrastructure::persistence::PoolSettings;
use crate::state::OperationTimeouts;

const DEFAULT_DB_PATH: &str = "./urlshortener.db";

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,

    // ── SqlitePool settings ─────────────────────────────────────────────────
    /// Maximum number of connections in the pool (`DB_MAX_CONNECTIONS`, default: 25).
    pub db_max_connections: u32,
    /// Connections kept open while idle (`DB_MIN_CONNECTIONS`, default: 5).
    pub db_min_connections: u32,
    /// Timeout for acquiring a connection from the pool in seconds
    /// (`DB_ACQUIRE_TIMEOUT`, default: 3).
    pub db_acquire_timeout: u64,
    /// How long a connection waits on a locked database, in milliseconds
    /// (`DB_BUSY_TIMEOUT_MS`, default: 5000).
    pub db_busy_timeout_ms: u64,
    /// Maximum connection lifetime in seconds (`DB_MAX_LIFETIME`, default: 300).
    pub db_max_lifetime: u64,

    pub shorten_timeout_ms: u64,
    pub redirect_timeout_ms: u64,
    pub stats_timeout_ms: u64,

    pub allocation_max_attempts: u32,

    pub rate_limit_per_minute: u32,
    pub shorten_rate_limit_per_minute: u32,

    pub static_dir: String,
    pub root_redirect_url: Option<String>,
    pub shutdown_timeout_secs: u64,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// Unparsable numeric values fall back to their defaults.
    pub fn from_env() -> Result<Self> {
        let database_url = Self::load_database_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let root_redirect_url = env::var("ROOT_REDIRECT_URL")
            .ok()
            .filter(|v| !v.trim().is_empty());

        Ok(Self {
            database_url,
            listen_addr,
            log_level,
            log_format,
            db_max_connections: env_or("DB_MAX_CONNECTIONS", 25),
            db_min_connections: env_or("DB_MIN_CONNECTIONS", 5),
            db_acquire_timeout: env_or("DB_ACQUIRE_TIMEOUT", 3),
            db_busy_timeout_ms: env_or("DB_BUSY_TIMEOUT_MS", 5000),
            db_max_lifetime: env_or("DB_MAX_LIFETIME", 300),
            shorten_timeout_ms: env_or("SHORTEN_TIMEOUT_MS", 3000),
            redirect_timeout_ms: env_or("REDIRECT_TIMEOUT_MS", 2000),
            stats_timeout_ms: env_or("STATS_TIMEOUT_MS", 5000),
            allocation_max_attempts: env_or("ALLOCATION_MAX_ATTEMPTS", 32),
            rate_limit_per_minute: env_or("RATE_LIMIT_PER_MINUTE", 100),
            shorten_rate_limit_per_minute: env_or("SHORTEN_RATE_LIMIT_PER_MINUTE", 10),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "./static".to_string()),
            root_redirect_url,
            shutdown_timeout_secs: env_or("SHUTDOWN_TIMEOUT_SECS", 30),
        })
    }

    /// Loads the database URL.
    ///
    /// Priority:
    /// 1. `DATABASE_URL` environment variable
    /// 2. `sqlite://` + `DB_PATH`
    /// 3. `sqlite://./urlshortener.db`
    fn load_database_url() -> String {
        if let Ok(url) = env::var("DATABASE_URL") {
            return url;
        }

        let path = env::var("DB_PATH").unwrap_or_else(|_| DEFAULT_DB_PATH.to_string());
        format!("sqlite://{}", path)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first invalid setting.
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if !self.database_url.starts_with("sqlite:") {
            anyhow::bail!(
                "DATABASE_URL must start with 'sqlite:', got '{}'",
                self.database_url
            );
        }

        if self.db_max_connections == 0 {
            anyhow::bail!("DB_MAX_CONNECTIONS must be at least 1");
        }
        if self.db_min_connections > self.db_max_connections {
            anyhow::bail!(
                "DB_MIN_CONNECTIONS ({}) must not exceed DB_MAX_CONNECTIONS ({})",
                self.db_min_connections,
                self.db_max_connections
            );
        }
        if self.db_acquire_timeout == 0 {
            anyhow::bail!("DB_ACQUIRE_TIMEOUT must be greater than 0");
        }

        for (name, value) in [
            ("SHORTEN_TIMEOUT_MS", self.shorten_timeout_ms),
            ("REDIRECT_TIMEOUT_MS", self.redirect_timeout_ms),
            ("STATS_TIMEOUT_MS", self.stats_timeout_ms),
        ] {
            if value == 0 {
                anyhow::bail!("{name} must be greater than 0");
            }
        }

        if !(1..=1000).contains(&self.allocation_max_attempts) {
            anyhow::bail!(
                "ALLOCATION_MAX_ATTEMPTS must be between 1 and 1000, got {}",
                self.allocation_max_attempts
            );
        }

        if self.rate_limit_per_minute == 0 || self.shorten_rate_limit_per_minute == 0 {
            anyhow::bail!("Rate limits must be at least 1 request per minute");
        }

        if let Some(ref url) = self.root_redirect_url
            && !url.starts_with("http://")
            && !url.starts_with("https://")
        {
            anyhow::bail!(
                "ROOT_REDIRECT_URL must start with 'http://' or 'https://', got '{}'",
                url
            );
        }

        Ok(())
    }

    /// Pool tuning derived from the `DB_*` variables.
    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.db_max_connections,
            min_connections: self.db_min_connections,
            acquire_timeout: Duration::from_secs(self.db_acquire_timeout),
            busy_timeout: Duration::from_millis(self.db_busy_timeout_ms),
            max_lifetime: Duration::from_secs(self.db_max_lifetime),
        }
    }

    /// Per-endpoint request deadlines.
    pub fn timeouts(&self) -> OperationTimeouts {
        OperationTimeouts {
            shorten: Duration::from_millis(self.shorten_timeout_ms),
            redirect: Duration::from_millis(self.redirect_timeout_ms),
            stats: Duration::from_millis(self.stats_timeout_ms),
        }
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Database: {}", self.database_url);
        tracing::info!(
            "  Pool: {}..{} connections, busy timeout {}ms",
            self.db_min_connections,
            self.db_max_connections,
            self.db_busy_timeout_ms
        );
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
        tracing::info!(
            "  Rate limits: {}/min global, {}/min shorten",
            self.rate_limit_per_minute,
            self.shorten_rate_limit_per_minute
        );

        match self.root_redirect_url {
            Some(ref url) => tracing::info!("  Root redirect: {}", url),
            None => tracing::info!("  Root redirect: disabled"),
        }
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config
        .validate()
        .context("Invalid configuration")?;
    Ok(config)
}
