use devstats_sources::{GitHubStats, LeetCodeStats};

use crate::constants::MAX_USERNAME_LEN;
use crate::errors::{Error, Result};

/// A record together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub data: T,
    /// True when served from the cache without an upstream call.
    pub cached: bool,
}

impl<T> Fetched<T> {
    pub fn fresh(data: T) -> Self {
        Self { data, cached: false }
    }

    pub fn cached(data: T) -> Self {
        Self { data, cached: true }
    }
}

/// Outcome of both sources for a combined request. Either side may fail
/// without affecting the other.
#[derive(Debug)]
pub struct CombinedStats {
    pub leetcode: Result<Fetched<LeetCodeStats>>,
    pub github: Result<Fetched<GitHubStats>>,
}

/// Accepts 1 to 64 characters of ASCII letters, digits, `-`, `_` and `.`.
pub fn validate_username(username: &str) -> Result<()> {
    let valid = !username.is_empty()
        && username.len() <= MAX_USERNAME_LEN
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
        && username != "."
        && username != "..";
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidUsername(username.to_string()))
    }
}
