use std::time::Duration;

use chrono::{DateTime, Utc};
use devstats_sources::{GitHubStats, LeetCodeStats, Source};
use serde::Serialize;

/// Builds the cache key for a source/username pair: `<source>_<username>`.
pub fn cache_key(source: Source, username: &str) -> String {
    format!("{}_{}", source.as_str(), username)
}

/// A normalized record of either source.
#[derive(Debug, Clone, PartialEq)]
pub enum CachedStats {
    LeetCode(LeetCodeStats),
    GitHub(GitHubStats),
}

impl CachedStats {
    pub fn source(&self) -> Source {
        match self {
            Self::LeetCode(_) => Source::LeetCode,
            Self::GitHub(_) => Source::GitHub,
        }
    }
}

/// A record type that can live in [`StatsCache`](super::StatsCache).
pub trait CachedRecord: Clone + Send + Sized {
    const SOURCE: Source;

    fn into_cached(self) -> CachedStats;

    /// Returns `None` when `cached` holds the other source's record.
    fn from_cached(cached: CachedStats) -> Option<Self>;
}

impl CachedRecord for LeetCodeStats {
    const SOURCE: Source = Source::LeetCode;

    fn into_cached(self) -> CachedStats {
        CachedStats::LeetCode(self)
    }

    fn from_cached(cached: CachedStats) -> Option<Self> {
        match cached {
            CachedStats::LeetCode(stats) => Some(stats),
            CachedStats::GitHub(_) => None,
        }
    }
}

impl CachedRecord for GitHubStats {
    const SOURCE: Source = Source::GitHub;

    fn into_cached(self) -> CachedStats {
        CachedStats::GitHub(self)
    }

    fn from_cached(cached: CachedStats) -> Option<Self> {
        match cached {
            CachedStats::GitHub(stats) => Some(stats),
            CachedStats::LeetCode(_) => None,
        }
    }
}

/// A stored value with its insertion time and lifetime.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub value: CachedStats,
    pub inserted_at: DateTime<Utc>,
    pub ttl: Duration,
}

impl CacheEntry {
    /// An entry is valid while `now - inserted_at < ttl`. A clock that went
    /// backwards counts as zero age.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        let age = (now - self.inserted_at).to_std().unwrap_or_default();
        age >= self.ttl
    }
}

/// Hit/miss counters for the introspection endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    /// Number of valid keys at the time of the snapshot.
    pub keys: usize,
}
