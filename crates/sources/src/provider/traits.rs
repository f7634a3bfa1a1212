//! Client traits for the two upstream platforms.
//!
//! The read-through service only depends on these traits, so tests can
//! substitute in-memory fakes for the HTTP providers.

use async_trait::async_trait;

use crate::errors::SourceError;
use crate::models::{GitHubStats, LeetCodeStats};

/// Fetches normalized statistics from the competitive-programming judge.
#[async_trait]
pub trait LeetCodeClient: Send + Sync {
    /// Fetch solved counts and contest ranking for `username`.
    ///
    /// Returns [`SourceError::UserNotFound`] when the judge has no such user.
    async fn fetch_stats(&self, username: &str) -> Result<LeetCodeStats, SourceError>;
}

/// Fetches normalized statistics from the code-hosting platform.
#[async_trait]
pub trait GitHubClient: Send + Sync {
    /// Fetch profile metadata and the contribution calendar for `username`.
    ///
    /// Both upstream calls must succeed; any failure is an upstream failure.
    async fn fetch_stats(&self, username: &str) -> Result<GitHubStats, SourceError>;
}
