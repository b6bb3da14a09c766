//! Storage trait for short link associations.

use async_trait::async_trait;

/// Errors raised by a storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached while establishing the connection.
    #[error("store connection error: {0}")]
    Connection(String),

    /// An operation failed or timed out against an established backend.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store mapping short codes to original URLs.
///
/// Every entry carries a TTL in seconds. Once it elapses, the entry must be
/// indistinguishable from one that was never written.
///
/// Implementations must be safe to share across tasks; a single instance is
/// built at startup and handed around as `Arc<dyn LinkStore>`.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::MemoryStore`] - Process-local, lost on restart
/// - [`crate::infrastructure::store::RedisStore`] - Redis with key-level expiry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Stores `url` under `code`, overwriting any existing entry.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be reached.
    async fn put(&self, code: &str, url: &str, ttl_seconds: u64) -> StoreResult<()>;

    /// Stores `url` under `code` only if no live entry exists for it.
    ///
    /// The check and the write are a single atomic step.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the entry was written
    /// - `Ok(false)` if `code` is already taken
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be reached.
    async fn put_if_absent(&self, code: &str, url: &str, ttl_seconds: u64) -> StoreResult<bool>;

    /// Looks up the URL stored under `code`.
    ///
    /// Returns `Ok(None)` if the code was never stored or has expired.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the backend cannot be reached.
    async fn get(&self, code: &str) -> StoreResult<Option<String>>;

    /// Checks if the backend is reachable.
    async fn health_check(&self) -> bool;

    /// Short backend name used in logs and the health response.
    fn kind(&self) -> &'static str;
}
