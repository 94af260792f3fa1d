//! Cache repository trait.

use std::time::Duration;

use crate::errors::Result;

/// Trait defining the contract for a keyed cache with per-entry TTL.
///
/// Values are JSON strings; callers own serialization so the trait stays
/// type-agnostic. Implementations must be safe for concurrent readers and
/// writers.
///
/// Callers must treat every error from this trait as a cache miss: the
/// cache is a performance optimization, never a correctness dependency.
pub trait CacheRepositoryTrait: Send + Sync {
    /// Returns the cached value for `key`, or `None` when absent or expired.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key` for at most `ttl`.
    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()>;
}
