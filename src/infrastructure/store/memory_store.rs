//! Process-local link store.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::domain::repositories::{LinkStore, StoreResult};

/// A stored URL and the instant it stops being visible.
#[derive(Debug, Clone)]
struct StoredLink {
    url: String,
    /// `None` when the TTL is too large to represent as an `Instant`.
    expires_at: Option<Instant>,
}

impl StoredLink {
    fn new(url: &str, ttl_seconds: u64) -> Self {
        Self {
            url: url.to_owned(),
            expires_at: Instant::now().checked_add(Duration::from_secs(ttl_seconds)),
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }
}

/// In-memory [`LinkStore`] backed by a [`DashMap`].
///
/// DashMap shards its locks, so reads and writes on different codes rarely
/// contend. Entries expire lazily on access and are reclaimed in bulk by
/// [`MemoryStore::purge_expired`], which [`run_sweeper`] calls periodically.
///
/// Nothing survives a process restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: DashMap<String, StoredLink>,
}

impl MemoryStore {
    pub fn new() -> Self {
        debug!("Using in-memory link store");
        Self {
            entries: DashMap::new(),
        }
    }

    /// Number of entries currently held, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every expired entry and returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut purged = 0;

        self.entries.retain(|_, link| {
            let keep = !link.is_expired(now);
            if !keep {
                purged += 1;
            }
            keep
        });

        purged
    }
}

#[async_trait]
impl LinkStore for MemoryStore {
    async fn put(&self, code: &str, url: &str, ttl_seconds: u64) -> StoreResult<()> {
        self.entries
            .insert(code.to_owned(), StoredLink::new(url, ttl_seconds));
        Ok(())
    }

    async fn put_if_absent(&self, code: &str, url: &str, ttl_seconds: u64) -> StoreResult<bool> {
        let now = Instant::now();

        match self.entries.entry(code.to_owned()) {
            Entry::Occupied(mut occupied) => {
                if occupied.get().is_expired(now) {
                    occupied.insert(StoredLink::new(url, ttl_seconds));
                    Ok(true)
                } else {
                    Ok(false)
                }
            }
            Entry::Vacant(vacant) => {
                vacant.insert(StoredLink::new(url, ttl_seconds));
                Ok(true)
            }
        }
    }

    async fn get(&self, code: &str) -> StoreResult<Option<String>> {
        let now = Instant::now();

        match self.entries.get(code) {
            None => return Ok(None),
            Some(link) if !link.is_expired(now) => return Ok(Some(link.url.clone())),
            Some(_) => {}
        }

        // Read guard must be released before removing from the same shard.
        self.entries.remove_if(code, |_, link| link.is_expired(now));

        Ok(None)
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

/// First sweep deadline used when `now + period` is not representable.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Periodically purges expired entries from `store`.
///
/// Runs until the runtime shuts down.
pub async fn run_sweeper(store: Arc<MemoryStore>, period: Duration) {
    let now = Instant::now();
    let start = now.checked_add(period).unwrap_or(now + FAR_FUTURE);
    let mut ticker = tokio::time::interval_at(start, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!("Memory store sweeper started (every {}s)", period.as_secs());

    loop {
        ticker.tick().await;

        let purged = store.purge_expired();
        if purged > 0 {
            metrics::counter!("memory_store_purged_total").increment(purged as u64);
            debug!("Purged {} expired links, {} remaining", purged, store.len());
        }
    }
}
