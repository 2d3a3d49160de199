//! Integration tests for the Hacker News trending source and the
//! deadline/fallback fetcher built on it.

use std::sync::Arc;
use std::time::Duration;

use mockito::Server;
use serde_json::json;

use scriptforge::adapters::mock::MockTrendingSource;
use scriptforge::adapters::trending::{
    CachedTrendingSource, HackerNewsConfig, HackerNewsSource, MIN_FALLBACK_ITEMS,
};
use scriptforge::domain::models::ExecutionMode;
use scriptforge::domain::ports::TrendingCandidateSource;
use scriptforge::services::TrendingFetcher;

fn source_for(server: &Server) -> HackerNewsSource {
    HackerNewsSource::new(HackerNewsConfig {
        base_url: server.url(),
        timeout_secs: 2,
    })
    .expect("Failed to create Hacker News client")
}

async fn mock_item(server: &mut Server, id: u64, body: serde_json::Value) -> mockito::Mock {
    server
        .mock("GET", format!("/item/{id}.json").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await
}

#[tokio::test]
async fn test_fetch_top_stories_in_rank_order() {
    let mut server = Server::new_async().await;
    let top = server
        .mock("GET", "/topstories.json")
        .with_status(200)
        .with_body("[101, 102, 103, 104, 105]")
        .create_async()
        .await;
    let _a = mock_item(
        &mut server,
        101,
        json!({"id": 101, "title": "Bun 2.0", "score": 500, "url": "https://bun.sh", "by": "jarred", "time": 1_700_000_000}),
    )
    .await;
    let _b = mock_item(&mut server, 102, json!({"id": 102, "deleted": true})).await;
    let _c = mock_item(
        &mut server,
        103,
        json!({"id": 103, "title": "Ask HN: Tabs or spaces?", "score": 80}),
    )
    .await;
    let _d = mock_item(&mut server, 104, json!({"id": 104, "title": "", "score": 3})).await;

    let items = source_for(&server).fetch(4).await.unwrap();

    let titles: Vec<&str> = items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Bun 2.0", "Ask HN: Tabs or spaces?"]);
    assert_eq!(items[0].url, "https://bun.sh");
    assert_eq!(items[0].by.as_deref(), Some("jarred"));
    assert_eq!(items[0].time, Some(1_700_000_000));
    assert_eq!(items[1].by.as_deref(), Some("unknown"));
    assert!(items[1].url.is_empty());
    top.assert_async().await;
}

#[tokio::test]
async fn test_failed_item_is_skipped() {
    let mut server = Server::new_async().await;
    let _top = server
        .mock("GET", "/topstories.json")
        .with_status(200)
        .with_body("[1, 2]")
        .create_async()
        .await;
    let _bad = server
        .mock("GET", "/item/1.json")
        .with_status(500)
        .create_async()
        .await;
    let _null = server
        .mock("GET", "/item/2.json")
        .with_status(200)
        .with_body("null")
        .create_async()
        .await;

    let items = source_for(&server).fetch(10).await.unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_top_stories_error_is_provider_error() {
    let mut server = Server::new_async().await;
    let _top = server
        .mock("GET", "/topstories.json")
        .with_status(503)
        .create_async()
        .await;

    let err = source_for(&server).fetch(5).await.unwrap_err();
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_fetcher_uses_live_feed_when_available() {
    let mut server = Server::new_async().await;
    let _top = server
        .mock("GET", "/topstories.json")
        .with_status(200)
        .with_body("[7]")
        .create_async()
        .await;
    let _item = mock_item(&mut server, 7, json!({"id": 7, "title": "Zig 1.0", "score": 900})).await;

    let fetcher = TrendingFetcher::new(
        Arc::new(source_for(&server)),
        Arc::new(CachedTrendingSource::default()),
    )
    .with_deadline(Duration::from_secs(2));
    let batch = fetcher.fetch(5, false).await;

    assert_eq!(batch.mode, ExecutionMode::Live);
    assert_eq!(batch.items.len(), 1);
    assert_eq!(batch.items[0].title, "Zig 1.0");
}

#[tokio::test]
async fn test_fetcher_falls_back_when_feed_is_down() {
    let mut server = Server::new_async().await;
    let _top = server
        .mock("GET", "/topstories.json")
        .with_status(500)
        .create_async()
        .await;

    let fetcher = TrendingFetcher::new(
        Arc::new(source_for(&server)),
        Arc::new(CachedTrendingSource::default()),
    );
    let batch = fetcher.fetch(5, false).await;

    assert_eq!(batch.mode, ExecutionMode::Cached);
    assert_eq!(batch.items.len(), 5);
    assert_eq!(batch.items, CachedTrendingSource::builtin()[..5].to_vec());
}

#[tokio::test]
async fn test_cached_mode_skips_live_feed() {
    let mut server = Server::new_async().await;
    let top = server
        .mock("GET", "/topstories.json")
        .expect(0)
        .create_async()
        .await;

    let fetcher = TrendingFetcher::new(
        Arc::new(source_for(&server)),
        Arc::new(CachedTrendingSource::default()),
    );
    let batch = fetcher.fetch(3, true).await;

    assert_eq!(batch.mode, ExecutionMode::Cached);
    assert_eq!(batch.items.len(), 3);
    top.assert_async().await;
}

#[tokio::test]
async fn test_fallback_from_short_cache_file_still_offers_full_list() {
    let dir = tempfile::tempdir().unwrap();
    let cache = dir.path().join("trending.json");
    std::fs::write(
        &cache,
        r#"[{"title": "Only story in the cache", "score": 42, "url": "https://example.com"}]"#,
    )
    .unwrap();

    let fetcher = TrendingFetcher::new(
        Arc::new(MockTrendingSource::hanging()),
        Arc::new(CachedTrendingSource::new(Some(cache))),
    )
    .with_deadline(Duration::from_millis(50));
    let batch = fetcher.fetch(50, false).await;

    assert_eq!(batch.mode, ExecutionMode::Cached);
    assert!(batch.items.len() >= MIN_FALLBACK_ITEMS);
    assert_eq!(batch.items[0].title, "Only story in the cache");
}
