#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use std::sync::Arc;
use shortlink::application::services::LinkService;
use shortlink::domain::repositories::{LinkStore, StoreError, StoreResult};
use shortlink::infrastructure::store::MemoryStore;
use shortlink::routes::routes;
use shortlink::state::AppState;

pub const TEST_BASE_URL: &str = "http://s.test";
pub const TEST_TTL_SECONDS: u64 = 3600;

/// Store whose every operation fails, as an unreachable Redis would.
pub struct FailingStore;

#[async_trait]
impl LinkStore for FailingStore {
    async fn put(&self, _code: &str, _url: &str, _ttl_seconds: u64) -> StoreResult<()> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn put_if_absent(&self, _code: &str, _url: &str, _ttl_seconds: u64) -> StoreResult<bool> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn get(&self, _code: &str) -> StoreResult<Option<String>> {
        Err(StoreError::Unavailable("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }

    fn kind(&self) -> &'static str {
        "redis"
    }
}

pub fn create_test_state(store: Arc<dyn LinkStore>) -> AppState {
    let link_service = Arc::new(LinkService::new(store, TEST_TTL_SECONDS));
    AppState::new(link_service).with_public_base_url(Some(TEST_BASE_URL.to_string()))
}

pub fn memory_state() -> (AppState, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (create_test_state(store.clone()), store)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(routes(state)).unwrap()
}
