#![allow(dead_code)]

use chrono::Utc;
use snaplink::config::Config;
use sqlx::SqlitePool;
use std::sync::Arc;
use snaplink::state::{AppState, OperationTimeouts};

pub async fn create_test_link(pool: &SqlitePool, code: &str, url: &str, domain: &str, clicks: i64) {
    sqlx::query(
        "INSERT INTO links (code, original_url, domain, created_at, clicks) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(code)
    .bind(url)
    .bind(domain)
    .bind(Utc::now())
    .bind(clicks)
    .execute(pool)
    .await
    .unwrap();
}

pub async fn count_links(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn clicks_of(pool: &SqlitePool, code: &str) -> i64 {
    sqlx::query_scalar("SELECT clicks FROM links WHERE code = ?")
        .bind(code)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn create_test_state(pool: SqlitePool) -> AppState {
    AppState::new(Arc::new(pool), 32, OperationTimeouts::default())
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        listen_addr: "127.0.0.1:0".to_string(),
        log_level: "info".to_string(),
        log_format: "text".to_string(),
        db_max_connections: 5,
        db_min_connections: 0,
        db_acquire_timeout: 3,
        db_busy_timeout_ms: 5000,
        db_max_lifetime: 300,
        shorten_timeout_ms: 3000,
        redirect_timeout_ms: 2000,
        stats_timeout_ms: 5000,
        allocation_max_attempts: 32,
        rate_limit_per_minute: 100,
        shorten_rate_limit_per_minute: 10,
        static_dir: "./static".to_string(),
        root_redirect_url: None,
        shutdown_timeout_secs: 1,
    }
}
