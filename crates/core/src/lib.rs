//! Devstats Core - caching and aggregation of per-source statistics.
//!
//! This crate owns the read-through cache that sits between the HTTP layer
//! and the upstream clients from `devstats-sources`. It has no HTTP types
//! of its own; the server crate turns its results into JSON envelopes.

pub mod cache;
pub mod clock;
pub mod constants;
pub mod errors;
pub mod stats;

pub use cache::{CacheStats, StatsCache};
pub use clock::{Clock, ManualClock, SystemClock};
pub use stats::{CombinedStats, Fetched, StatsService, StatsServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
