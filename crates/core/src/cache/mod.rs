//! In-memory TTL cache for normalized statistics records.

mod cache_model;
mod cache_store;

pub use cache_model::{cache_key, CacheEntry, CacheStats, CachedRecord, CachedStats};
pub use cache_store::StatsCache;
