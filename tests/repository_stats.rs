mod common;

use snaplink::domain::repositories::StatsRepository;
use snaplink::infrastructure::persistence::SqliteStatsRepository;
use sqlx::SqlitePool;
use std::sync::Arc;

#[sqlx::test]
async fn test_aggregate_empty_store(pool: SqlitePool) {
    let repo = SqliteStatsRepository::new(Arc::new(pool));

    let aggregate = repo.aggregate(3).await.unwrap();

    assert_eq!(aggregate.totals.total_links, 0);
    assert_eq!(aggregate.totals.total_clicks, 0);
    assert!(aggregate.domains.is_empty());
    assert!(aggregate.top_links.is_empty());
}

#[sqlx::test]
async fn test_aggregate_totals_and_top_links(pool: SqlitePool) {
    common::create_test_link(&pool, "AAAAAA", "https://a.com", "s.io", 5).await;
    common::create_test_link(&pool, "BBBBBB", "https://b.com", "s.io", 9).await;
    common::create_test_link(&pool, "CCCCCC", "https://c.com", "t.io", 1).await;

    let repo = SqliteStatsRepository::new(Arc::new(pool));
    let aggregate = repo.aggregate(3).await.unwrap();

    assert_eq!(aggregate.totals.total_links, 3);
    assert_eq!(aggregate.totals.total_clicks, 15);

    let codes: Vec<&str> = aggregate
        .top_links
        .iter()
        .map(|l| l.code.as_str())
        .collect();
    assert_eq!(codes, vec!["BBBBBB", "AAAAAA", "CCCCCC"]);
    assert_eq!(aggregate.top_links[0].original_url, "https://b.com");
    assert_eq!(aggregate.top_links[0].clicks, 9);
}

#[sqlx::test]
async fn test_aggregate_per_domain(pool: SqlitePool) {
    common::create_test_link(&pool, "AAAAAA", "https://a.com", "s.io", 5).await;
    common::create_test_link(&pool, "BBBBBB", "https://b.com", "s.io", 9).await;
    common::create_test_link(&pool, "CCCCCC", "https://c.com", "t.io", 1).await;
    common::create_test_link(&pool, "DDDDDD", "https://d.com", "a.io", 0).await;

    let repo = SqliteStatsRepository::new(Arc::new(pool));
    let aggregate = repo.aggregate(3).await.unwrap();

    let domains: Vec<(&str, i64, i64)> = aggregate
        .domains
        .iter()
        .map(|d| (d.domain.as_str(), d.clicks, d.links))
        .collect();

    assert_eq!(
        domains,
        vec![("a.io", 0, 1), ("s.io", 14, 2), ("t.io", 1, 1)]
    );
}

#[sqlx::test]
async fn test_aggregate_top_links_limit_and_tie_break(pool: SqlitePool) {
    common::create_test_link(&pool, "first1", "https://1.com", "s.io", 2).await;
    common::create_test_link(&pool, "secnd2", "https://2.com", "s.io", 7).await;
    common::create_test_link(&pool, "third3", "https://3.com", "s.io", 2).await;
    common::create_test_link(&pool, "forth4", "https://4.com", "s.io", 2).await;

    let repo = SqliteStatsRepository::new(Arc::new(pool));
    let aggregate = repo.aggregate(3).await.unwrap();

    let codes: Vec<&str> = aggregate
        .top_links
        .iter()
        .map(|l| l.code.as_str())
        .collect();
    assert_eq!(codes, vec!["secnd2", "first1", "third3"]);
}

#[sqlx::test]
async fn test_totals(pool: SqlitePool) {
    let repo = SqliteStatsRepository::new(Arc::new(pool.clone()));

    let empty = repo.totals().await.unwrap();
    assert_eq!(empty.total_links, 0);
    assert_eq!(empty.total_clicks, 0);

    common::create_test_link(&pool, "AAAAAA", "https://a.com", "s.io", 5).await;
    common::create_test_link(&pool, "BBBBBB", "https://b.com", "t.io", 9).await;

    let totals = repo.totals().await.unwrap();
    assert_eq!(totals.total_links, 2);
    assert_eq!(totals.total_clicks, 14);
}
