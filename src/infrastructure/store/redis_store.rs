//! Redis-backed link store.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, info, warn};

use crate::domain::repositories::{LinkStore, StoreError, StoreResult};

/// Connection settings for [`RedisStore::connect`].
#[derive(Debug, Clone)]
pub struct RedisStoreOptions {
    /// Upper bound for a single Redis round trip.
    pub operation_timeout: Duration,
    /// Additional connection attempts after the first one fails.
    pub connect_retries: usize,
    /// Prepended to every key. Empty by default so keys are the bare codes.
    pub key_prefix: String,
}

impl Default for RedisStoreOptions {
    fn default() -> Self {
        Self {
            operation_timeout: Duration::from_secs(2),
            connect_retries: 3,
            key_prefix: String::new(),
        }
    }
}

/// Redis [`LinkStore`] relying on key-level expiry.
///
/// Holds a single [`ConnectionManager`], which multiplexes concurrent callers
/// over one connection and reconnects on its own. Unlike a cache, errors are
/// not swallowed: every failure or timeout surfaces as
/// [`StoreError::Unavailable`].
pub struct RedisStore {
    conn: ConnectionManager,
    operation_timeout: Duration,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// Connection attempts are retried with jittered exponential backoff up to
    /// `options.connect_retries` times. An unparseable URL is not retried.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or no attempt
    /// produced a working connection.
    pub async fn connect(redis_url: &str, options: RedisStoreOptions) -> StoreResult<Self> {
        info!("Connecting to Redis at {}", crate::config::mask_connection_string(redis_url));

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {}", e))
        })?;

        let strategy = ExponentialBackoff::from_millis(10)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(options.connect_retries);

        let timeout = options.operation_timeout;
        let conn = Retry::spawn(strategy, || {
            let client = client.clone();
            async move {
                let result = Self::open_connection(client, timeout).await;
                if let Err(e) = &result {
                    warn!("Redis connection attempt failed: {}", e);
                }
                result
            }
        })
        .await?;

        info!("Connected to Redis");

        Ok(Self {
            conn,
            operation_timeout: options.operation_timeout,
            key_prefix: options.key_prefix,
        })
    }

    async fn open_connection(client: Client, timeout: Duration) -> StoreResult<ConnectionManager> {
        let manager = tokio::time::timeout(timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| StoreError::Connection("Timed out connecting to Redis".to_string()))?
            .map_err(|e| StoreError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut test_conn = manager.clone();
        tokio::time::timeout(timeout, test_conn.ping::<()>())
            .await
            .map_err(|_| StoreError::Connection("Redis PING timed out".to_string()))?
            .map_err(|e| StoreError::Connection(format!("Redis PING failed: {}", e)))?;

        Ok(manager)
    }

    /// Constructs the full Redis key with the namespace prefix.
    fn build_key(&self, code: &str) -> String {
        format!("{}{}", self.key_prefix, code)
    }

    /// Awaits a Redis call under the operation timeout.
    async fn bounded<T, F>(&self, op: &'static str, fut: F) -> StoreResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.operation_timeout, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                warn!("Redis {} error: {}", op, e);
                Err(StoreError::Unavailable(format!("Redis {} failed: {}", op, e)))
            }
            Err(_) => {
                warn!(
                    "Redis {} timed out after {}ms",
                    op,
                    self.operation_timeout.as_millis()
                );
                Err(StoreError::Unavailable(format!("Redis {} timed out", op)))
            }
        }
    }
}

#[async_trait]
impl LinkStore for RedisStore {
    async fn put(&self, code: &str, url: &str, ttl_seconds: u64) -> StoreResult<()> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        self.bounded("SET", conn.set_ex::<_, _, ()>(&key, url, ttl_seconds))
            .await?;

        debug!("SET {} -> {} (TTL: {}s)", code, url, ttl_seconds);
        Ok(())
    }

    async fn put_if_absent(&self, code: &str, url: &str, ttl_seconds: u64) -> StoreResult<bool> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        let mut cmd = redis::cmd("SET");
        cmd.arg(&key).arg(url).arg("NX").arg("EX").arg(ttl_seconds);

        // SET NX replies OK when written and nil when the key exists.
        let reply: Option<String> = self
            .bounded("SET NX", cmd.query_async(&mut conn))
            .await?;

        let written = reply.is_some();
        debug!("SET NX {} -> {} (written: {})", code, url, written);
        Ok(written)
    }

    async fn get(&self, code: &str) -> StoreResult<Option<String>> {
        let key = self.build_key(code);
        let mut conn = self.conn.clone();

        let url = self
            .bounded("GET", conn.get::<_, Option<String>>(&key))
            .await?;

        match &url {
            Some(url) => debug!("GET HIT: {} -> {}", code, url),
            None => debug!("GET MISS: {}", code),
        }

        Ok(url)
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        self.bounded("PING", conn.ping::<()>()).await.is_ok()
    }

    fn kind(&self) -> &'static str {
        "redis"
    }
}
