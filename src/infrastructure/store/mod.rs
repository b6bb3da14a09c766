//! Link store backends.
//!
//! Provides two [`crate::domain::repositories::LinkStore`] implementations:
//! - [`MemoryStore`] - Process-local map with lazy expiry and a sweeper task
//! - [`RedisStore`] - Redis with key-level TTL

mod memory_store;
mod redis_store;

pub use memory_store::{MemoryStore, run_sweeper};
pub use redis_store::{RedisStore, RedisStoreOptions};
