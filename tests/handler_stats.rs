mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use snaplink::api::handlers::stats_handler;
use sqlx::SqlitePool;

fn server(pool: SqlitePool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/stats", get(stats_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_stats_empty(pool: SqlitePool) {
    let server = server(pool);

    let response = server.get("/stats").await;

    response.assert_status_ok();
    assert_eq!(response.header("cache-control"), "public, max-age=60");

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["totalClicks"], 0);
    assert_eq!(json["totalLinks"], 0);
    assert_eq!(json["clicksPerDomain"], serde_json::json!({}));
    assert_eq!(json["linksPerDomain"], serde_json::json!({}));
    assert_eq!(json["topUrls"], serde_json::json!([]));
}

#[sqlx::test]
async fn test_stats_aggregates(pool: SqlitePool) {
    common::create_test_link(&pool, "AAAAAA", "https://a.com", "s.io", 5).await;
    common::create_test_link(&pool, "BBBBBB", "https://b.com", "s.io", 9).await;
    common::create_test_link(&pool, "CCCCCC", "https://c.com", "t.io", 1).await;

    let server = server(pool);

    let response = server.get("/stats").await;
    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["totalClicks"], 15);
    assert_eq!(json["totalLinks"], 3);
    assert_eq!(json["clicksPerDomain"]["s.io"], 14);
    assert_eq!(json["clicksPerDomain"]["t.io"], 1);
    assert_eq!(json["linksPerDomain"]["s.io"], 2);
    assert_eq!(json["linksPerDomain"]["t.io"], 1);

    let top = json["topUrls"].as_array().unwrap();
    assert_eq!(top.len(), 3);
    assert_eq!(top[0]["shortCode"], "BBBBBB");
    assert_eq!(top[0]["url"], "https://b.com");
    assert_eq!(top[0]["clicks"], 9);
    assert!(top[0]["createdAt"].is_string());
    assert_eq!(top[1]["shortCode"], "AAAAAA");
    assert_eq!(top[2]["shortCode"], "CCCCCC");
}
