use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use devstats_core::constants::{DEFAULT_CACHE_CHECK_PERIOD, DEFAULT_CACHE_TTL};

/// Longer than every upstream client timeout, so upstream limits fire first.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(35);

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub github_token: Option<String>,
    /// Deployment-environment label, e.g. "development" or "production".
    pub environment: String,
    pub request_timeout: Duration,
    pub cache_ttl: Duration,
    pub cache_check_period: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_var("DEVSTATS_PORT", 3000)?;
        let listen_addr = SocketAddr::from(([0, 0, 0, 0], port));
        let cors_allow = std::env::var("DEVSTATS_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let github_token = std::env::var("DEVSTATS_GITHUB_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        let environment =
            std::env::var("DEVSTATS_ENV").unwrap_or_else(|_| "development".into());
        let timeout_ms: u64 = parse_var("DEVSTATS_REQUEST_TIMEOUT_MS", DEFAULT_REQUEST_TIMEOUT.as_millis() as u64)?;
        let ttl_secs: u64 = parse_var("DEVSTATS_CACHE_TTL_SECS", DEFAULT_CACHE_TTL.as_secs())?;
        let check_secs: u64 = parse_var(
            "DEVSTATS_CACHE_CHECK_PERIOD_SECS",
            DEFAULT_CACHE_CHECK_PERIOD.as_secs(),
        )?;

        Ok(Self {
            listen_addr,
            cors_allow,
            github_token,
            environment,
            request_timeout: Duration::from_millis(timeout_ms),
            cache_ttl: Duration::from_secs(ttl_secs),
            cache_check_period: Duration::from_secs(check_secs.max(1)),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cors_allow: vec!["*".to_string()],
            github_token: None,
            environment: "development".to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_check_period: DEFAULT_CACHE_CHECK_PERIOD,
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {name}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
