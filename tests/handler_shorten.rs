mod common;

use axum::{Router, routing::post};
use axum_test::TestServer;
use serde_json::json;
use snaplink::api::handlers::shorten_handler;
use sqlx::SqlitePool;

fn server(pool: SqlitePool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/shorten", post(shorten_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_shorten_success(pool: SqlitePool) {
    let server = server(pool.clone());

    let response = server
        .post("/shorten")
        .json(&json!({
            "url": "https://example.com/some/long/path",
            "domain": "s.example.com"
        }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let code = json["shortCode"].as_str().unwrap();
    assert_eq!(code.len(), 6);
    assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(
        json["shortUrl"],
        format!("https://s.example.com/{code}").as_str()
    );

    assert_eq!(common::count_links(&pool).await, 1);
}

#[sqlx::test]
async fn test_shorten_rejects_unsupported_scheme(pool: SqlitePool) {
    let server = server(pool.clone());

    let response = server
        .post("/shorten")
        .json(&json!({
            "url": "ftp://example.com",
            "domain": "s.example.com"
        }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(json["error"]["message"], "Invalid URL format");

    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_rejects_empty_domain(pool: SqlitePool) {
    let server = server(pool.clone());

    let response = server
        .post("/shorten")
        .json(&json!({
            "url": "https://example.com",
            "domain": ""
        }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert_eq!(common::count_links(&pool).await, 0);
}

#[sqlx::test]
async fn test_shorten_rejects_malformed_body(pool: SqlitePool) {
    let server = server(pool);

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["message"],
        "Invalid request body"
    );

    let response = server
        .post("/shorten")
        .text("not json")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
}

#[sqlx::test]
async fn test_shorten_same_url_twice_gives_distinct_codes(pool: SqlitePool) {
    let server = server(pool.clone());
    let body = json!({ "url": "https://example.com", "domain": "s.io" });

    let first = server.post("/shorten").json(&body).await;
    let second = server.post("/shorten").json(&body).await;

    first.assert_status_ok();
    second.assert_status_ok();
    assert_ne!(
        first.json::<serde_json::Value>()["shortCode"],
        second.json::<serde_json::Value>()["shortCode"]
    );
    assert_eq!(common::count_links(&pool).await, 2);
}
