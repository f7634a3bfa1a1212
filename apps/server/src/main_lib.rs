use std::sync::Arc;

use devstats_core::{Clock, StatsCache, StatsService, StatsServiceTrait, SystemClock};
use devstats_sources::{GitHubClient, GitHubProvider, LeetCodeClient, LeetCodeProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub stats_service: Arc<dyn StatsServiceTrait>,
    /// The same cache the stats service reads through, exposed for the
    /// introspection routes and the sweep scheduler.
    pub cache: Arc<StatsCache>,
    pub clock: Arc<dyn Clock>,
    pub environment: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("DEVSTATS_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Wires the production upstream clients and the wall clock.
pub fn build_state(config: &Config) -> Arc<AppState> {
    let leetcode: Arc<dyn LeetCodeClient> = Arc::new(LeetCodeProvider::new());
    let github: Arc<dyn GitHubClient> =
        Arc::new(GitHubProvider::new(config.github_token.clone()));

    tracing::info!(
        "GitHub token {}",
        if config.github_token.is_some() {
            "configured"
        } else {
            "not configured (unauthenticated rate limits apply)"
        }
    );

    build_state_with(config, leetcode, github, Arc::new(SystemClock))
}

/// Builds the application state around the given clients and clock.
pub fn build_state_with(
    config: &Config,
    leetcode: Arc<dyn LeetCodeClient>,
    github: Arc<dyn GitHubClient>,
    clock: Arc<dyn Clock>,
) -> Arc<AppState> {
    let cache = Arc::new(StatsCache::new(clock.clone(), config.cache_ttl));
    let stats_service = Arc::new(StatsService::new(cache.clone(), leetcode, github));

    Arc::new(AppState {
        stats_service,
        cache,
        clock,
        environment: config.environment.clone(),
    })
}
