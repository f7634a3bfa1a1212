use async_trait::async_trait;
use devstats_sources::{GitHubStats, LeetCodeStats};

use super::stats_model::{CombinedStats, Fetched};
use crate::errors::Result;

/// Trait for statistics retrieval operations
#[async_trait]
pub trait StatsServiceTrait: Send + Sync {
    async fn get_leetcode_stats(&self, username: &str) -> Result<Fetched<LeetCodeStats>>;
    async fn get_github_stats(&self, username: &str) -> Result<Fetched<GitHubStats>>;

    /// Fetch both sources concurrently. Non-empty overrides replace
    /// `username` for their source.
    async fn get_combined_stats(
        &self,
        username: &str,
        leetcode_username: Option<&str>,
        github_username: Option<&str>,
    ) -> Result<CombinedStats>;
}
