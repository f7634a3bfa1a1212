use std::time::Duration;

/// Default lifetime of a cached statistics record (24 hours).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Default interval between background sweeps of expired entries.
pub const DEFAULT_CACHE_CHECK_PERIOD: Duration = Duration::from_secs(120);

/// Longest username accepted by the retrieval paths.
pub const MAX_USERNAME_LEN: usize = 64;
