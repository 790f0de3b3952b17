mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use snaplink::api::handlers::redirect_handler;
use sqlx::SqlitePool;

fn server(pool: SqlitePool) -> TestServer {
    let state = common::create_test_state(pool);
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[sqlx::test]
async fn test_redirect_success(pool: SqlitePool) {
    common::create_test_link(&pool, "redir1", "https://example.com/target", "s.io", 0).await;
    let server = server(pool.clone());

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), 301);
    assert_eq!(response.header("location"), "https://example.com/target");
    assert_eq!(common::clicks_of(&pool, "redir1").await, 1);
}

#[sqlx::test]
async fn test_redirect_counts_every_hit(pool: SqlitePool) {
    common::create_test_link(&pool, "redir2", "https://example.com", "s.io", 10).await;
    let server = server(pool.clone());

    for _ in 0..3 {
        assert_eq!(server.get("/redir2").await.status_code(), 301);
    }

    assert_eq!(common::clicks_of(&pool, "redir2").await, 13);
}

#[sqlx::test]
async fn test_redirect_not_found(pool: SqlitePool) {
    let server = server(pool);

    let response = server.get("/nope12").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
    assert_eq!(json["error"]["message"], "Short URL not found");
}

#[sqlx::test]
async fn test_redirect_malformed_code_not_found(pool: SqlitePool) {
    let server = server(pool);

    server.get("/favicon.ico").await.assert_status_not_found();
    server.get("/abc").await.assert_status_not_found();
}
