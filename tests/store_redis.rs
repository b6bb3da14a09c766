//! Redis store tests against a live server.
//!
//! Skipped unless `TEST_REDIS_URL` is set, e.g.
//! `TEST_REDIS_URL=redis://localhost:6379 cargo test --test store_redis`.

use shortlink::domain::repositories::LinkStore;
use shortlink::infrastructure::store::{RedisStore, RedisStoreOptions};
use shortlink::utils::code_generator::generate_code;
use std::time::Duration;

async fn connect() -> Option<RedisStore> {
    let url = std::env::var("TEST_REDIS_URL").ok()?;
    let options = RedisStoreOptions {
        key_prefix: "shortlink-test:".to_string(),
        ..RedisStoreOptions::default()
    };

    Some(RedisStore::connect(&url, options).await.unwrap())
}

#[tokio::test]
async fn test_redis_put_and_get() {
    let Some(store) = connect().await else {
        return;
    };

    let code = generate_code().unwrap();
    store.put(&code, "https://example.com/a?b=1", 60).await.unwrap();

    assert_eq!(
        store.get(&code).await.unwrap().as_deref(),
        Some("https://example.com/a?b=1")
    );
}

#[tokio::test]
async fn test_redis_unknown_code() {
    let Some(store) = connect().await else {
        return;
    };

    let code = generate_code().unwrap();
    assert_eq!(store.get(&code).await.unwrap(), None);
}

#[tokio::test]
async fn test_redis_put_if_absent_refuses_live_code() {
    let Some(store) = connect().await else {
        return;
    };

    let code = generate_code().unwrap();
    assert!(store.put_if_absent(&code, "https://first.example/", 60).await.unwrap());
    assert!(!store.put_if_absent(&code, "https://second.example/", 60).await.unwrap());

    assert_eq!(
        store.get(&code).await.unwrap().as_deref(),
        Some("https://first.example/")
    );
}

#[tokio::test]
async fn test_redis_entry_expires() {
    let Some(store) = connect().await else {
        return;
    };

    let code = generate_code().unwrap();
    store.put(&code, "https://example.com/", 1).await.unwrap();
    assert!(store.get(&code).await.unwrap().is_some());

    tokio::time::sleep(Duration::from_millis(2100)).await;

    assert_eq!(store.get(&code).await.unwrap(), None);
}

#[tokio::test]
async fn test_redis_health_and_kind() {
    let Some(store) = connect().await else {
        return;
    };

    assert!(store.health_check().await);
    assert_eq!(store.kind(), "redis");
}
