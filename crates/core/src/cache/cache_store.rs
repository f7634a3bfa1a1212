//! Process-wide statistics cache.
//!
//! Entries live in a `DashMap`, so concurrent handlers never block each
//! other on different keys. Expiry is checked on every read; the periodic
//! sweep only reclaims memory.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use log::debug;

use super::cache_model::{CacheEntry, CacheStats, CachedStats};
use crate::clock::Clock;

pub struct StatsCache {
    entries: DashMap<String, CacheEntry>,
    clock: Arc<dyn Clock>,
    default_ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl StatsCache {
    /// Create a cache whose [`set_default`](Self::set_default) uses `default_ttl`.
    pub fn new(clock: Arc<dyn Clock>, default_ttl: Duration) -> Self {
        Self {
            entries: DashMap::new(),
            clock,
            default_ttl,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Get a cached value by key. Returns `None` if missing or expired, and
    /// counts the lookup as a hit or a miss.
    pub fn get(&self, key: &str) -> Option<CachedStats> {
        let now = self.clock.now();
        let found = match self.entries.get(key) {
            Some(entry) if !entry.is_expired(now) => Some(entry.value.clone()),
            Some(entry) => {
                drop(entry);
                // A concurrent set may have refreshed the entry in between.
                self.entries.remove_if(key, |_, e| e.is_expired(now));
                debug!("Cache entry '{}' expired", key);
                None
            }
            None => None,
        };

        if found.is_some() {
            self.hits.fetch_add(1, Ordering::Relaxed);
        } else {
            self.misses.fetch_add(1, Ordering::Relaxed);
        }
        found
    }

    /// Store `value` under `key`, replacing any previous entry wholesale.
    pub fn set(&self, key: impl Into<String>, value: CachedStats, ttl: Duration) {
        self.entries.insert(
            key.into(),
            CacheEntry {
                value,
                inserted_at: self.clock.now(),
                ttl,
            },
        );
    }

    /// Store `value` with the cache's default TTL.
    pub fn set_default(&self, key: impl Into<String>, value: CachedStats) {
        self.set(key, value, self.default_ttl);
    }

    /// Keys of all entries that are still valid, sorted.
    pub fn keys(&self) -> Vec<String> {
        let now = self.clock.now();
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| !entry.value().is_expired(now))
            .map(|entry| entry.key().clone())
            .collect();
        keys.sort();
        keys
    }

    /// Remove every entry. Hit/miss counters are kept.
    pub fn flush_all(&self) {
        self.entries.clear();
    }

    /// Remove all expired entries, returning how many were dropped.
    pub fn sweep_expired(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            keys: self.keys().len(),
        }
    }

    /// Number of stored entries, including expired ones not yet swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
