//! Read-through statistics service.
//!
//! Each per-source lookup goes cache first, then the upstream client on a
//! miss. Only successful upstream results are stored.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use devstats_sources::{GitHubClient, GitHubStats, LeetCodeClient, LeetCodeStats, SourceError};
use log::{debug, info, warn};

use super::stats_model::{validate_username, CombinedStats, Fetched};
use super::stats_traits::StatsServiceTrait;
use crate::cache::{cache_key, CachedRecord, StatsCache};
use crate::errors::{Error, Result};

pub struct StatsService {
    cache: Arc<StatsCache>,
    leetcode: Arc<dyn LeetCodeClient>,
    github: Arc<dyn GitHubClient>,
}

impl StatsService {
    pub fn new(
        cache: Arc<StatsCache>,
        leetcode: Arc<dyn LeetCodeClient>,
        github: Arc<dyn GitHubClient>,
    ) -> Self {
        Self {
            cache,
            leetcode,
            github,
        }
    }

    pub fn cache(&self) -> &Arc<StatsCache> {
        &self.cache
    }

    async fn read_through<T, F, Fut>(&self, username: &str, fetch: F) -> Result<Fetched<T>>
    where
        T: CachedRecord,
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<T, SourceError>>,
    {
        validate_username(username)?;

        let source = T::SOURCE;
        let key = cache_key(source, username);

        if let Some(hit) = self.cache.get(&key).and_then(T::from_cached) {
            debug!("Serving {} data from cache for {}", source, username);
            return Ok(Fetched::cached(hit));
        }

        info!("Fetching fresh {} data for {}", source, username);
        match fetch().await {
            Ok(record) => {
                self.cache.set_default(key, record.clone().into_cached());
                Ok(Fetched::fresh(record))
            }
            Err(err) => {
                warn!("{} fetch failed for {}: {}", source, username, err);
                Err(Error::from(err))
            }
        }
    }
}

/// A non-empty override replaces the shared username.
fn effective_username<'a>(shared: &'a str, override_name: Option<&'a str>) -> &'a str {
    override_name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(shared)
}

#[async_trait]
impl StatsServiceTrait for StatsService {
    async fn get_leetcode_stats(&self, username: &str) -> Result<Fetched<LeetCodeStats>> {
        self.read_through(username, || self.leetcode.fetch_stats(username))
            .await
    }

    async fn get_github_stats(&self, username: &str) -> Result<Fetched<GitHubStats>> {
        self.read_through(username, || self.github.fetch_stats(username))
            .await
    }

    async fn get_combined_stats(
        &self,
        username: &str,
        leetcode_username: Option<&str>,
        github_username: Option<&str>,
    ) -> Result<CombinedStats> {
        validate_username(username)?;

        let leetcode_username = effective_username(username, leetcode_username);
        let github_username = effective_username(username, github_username);

        // Both sides always run to completion; neither cancels the other.
        let (leetcode, github) = tokio::join!(
            self.get_leetcode_stats(leetcode_username),
            self.get_github_stats(github_username),
        );

        Ok(CombinedStats { leetcode, github })
    }
}
