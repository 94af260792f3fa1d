//! In-process TTL cache store.
//!
//! Implements the core cache trait over a guarded map. Good enough for a
//! single-instance deployment; a multi-instance deployment swaps this for a
//! shared keyed store behind the same trait.

use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use barberledger_core::cache::CacheRepositoryTrait;
use barberledger_core::errors::{Error, Result};

struct CacheEntry {
    payload: String,
    expires_at: Instant,
}

/// Keyed in-memory store with per-entry expiry.
///
/// Expired entries are skipped on read and purged on the next write.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheRepositoryTrait for MemoryCacheStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| Error::Cache("Cache lock poisoned".to_string()))?;
        Ok(entries
            .get(key)
            .filter(|entry| entry.expires_at > Instant::now())
            .map(|entry| entry.payload.clone()))
    }

    fn set(&self, key: &str, value: String, ttl: Duration) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| Error::Cache("Cache lock poisoned".to_string()))?;
        let now = Instant::now();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            CacheEntry {
                payload: value,
                expires_at: now + ttl,
            },
        );
        Ok(())
    }
}
