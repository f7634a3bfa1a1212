//! GitHub statistics provider.
//!
//! A GitHub record is assembled from two independent upstream calls:
//! - the public REST API (`/users/{username}`) for profile metadata
//! - a third-party contribution calendar service for the daily sequence
//!
//! The optional access token is only sent to the GitHub REST API. The
//! calendar service gets its own, shorter timeout.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Datelike, Utc};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use crate::contributions::reshape_weeks;
use crate::errors::SourceError;
use crate::models::{ContributionDay, ContributionSummary, GitHubStats};
use crate::provider::{status_error, GitHubClient};

const API_BASE_URL: &str = "https://api.github.com";
const CONTRIBUTIONS_BASE_URL: &str = "https://github-contributions-api.jogruber.de/v4";
const PROFILE_PROVIDER_ID: &str = "GITHUB";
const CALENDAR_PROVIDER_ID: &str = "GITHUB_CONTRIBUTIONS";
const USER_AGENT: &str = "devstats";

/// Upper bound for the contribution calendar call.
const CALENDAR_TIMEOUT: Duration = Duration::from_secs(10);

// ============================================================================
// API Response Structures
// ============================================================================

/// Response from /users/{username}
#[derive(Debug, Deserialize)]
struct ProfileResponse {
    login: String,
    name: Option<String>,
    avatar_url: Option<String>,
    bio: Option<String>,
    #[serde(default)]
    public_repos: u32,
    #[serde(default)]
    followers: u32,
    #[serde(default)]
    following: u32,
}

/// Response from the contribution calendar service.
#[derive(Debug, Deserialize)]
struct CalendarResponse {
    /// Totals keyed by year, plus a "lastYear" rollup.
    #[serde(default)]
    total: HashMap<String, u32>,
    #[serde(default)]
    contributions: Vec<ContributionDay>,
}

fn normalize(profile: ProfileResponse, calendar: CalendarResponse, year: i32) -> GitHubStats {
    let total = calendar
        .total
        .get(&year.to_string())
        .copied()
        .unwrap_or(0);
    let weeks = reshape_weeks(&calendar.contributions);

    GitHubStats {
        username: profile.login,
        name: profile.name,
        avatar: profile.avatar_url,
        bio: profile.bio,
        public_repos: profile.public_repos,
        followers: profile.followers,
        following: profile.following,
        contributions: ContributionSummary {
            total,
            last_year: calendar.contributions,
            weeks,
        },
    }
}

// ============================================================================
// GitHubProvider
// ============================================================================

/// GitHub profile + contribution calendar client.
pub struct GitHubProvider {
    client: Client,
    api_base: String,
    contributions_base: String,
    token: Option<String>,
    calendar_timeout: Duration,
}

impl GitHubProvider {
    /// Create a provider against the public endpoints.
    ///
    /// `token` raises the REST API rate limit when present.
    pub fn new(token: Option<String>) -> Self {
        Self::with_endpoints(API_BASE_URL, CONTRIBUTIONS_BASE_URL, token)
    }

    pub fn with_endpoints(
        api_base: impl Into<String>,
        contributions_base: impl Into<String>,
        token: Option<String>,
    ) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            api_base: api_base.into(),
            contributions_base: contributions_base.into(),
            token: token.filter(|t| !t.trim().is_empty()),
            calendar_timeout: CALENDAR_TIMEOUT,
        }
    }

    /// Overrides the calendar call's timeout.
    pub fn with_calendar_timeout(mut self, timeout: Duration) -> Self {
        self.calendar_timeout = timeout;
        self
    }

    async fn fetch_profile(&self, username: &str) -> Result<ProfileResponse, SourceError> {
        let url = format!("{}/users/{}", self.api_base, username);
        let mut request = self.client.get(&url);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("token {}", token));
        }
        send_json(request, PROFILE_PROVIDER_ID).await
    }

    async fn fetch_calendar(&self, username: &str) -> Result<CalendarResponse, SourceError> {
        let url = format!("{}/{}", self.contributions_base, username);
        let request = self.client.get(&url).timeout(self.calendar_timeout);
        send_json(request, CALENDAR_PROVIDER_ID).await
    }
}

/// Sends `request` and decodes a JSON body, mapping every failure to a
/// [`SourceError`] tagged with `provider`.
async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    provider: &str,
) -> Result<T, SourceError> {
    let response = request
        .send()
        .await
        .map_err(|e| SourceError::from_request(provider, e))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(status_error(provider, status, &body));
    }

    response
        .json()
        .await
        .map_err(|e| SourceError::provider(provider, format!("Invalid response: {}", e)))
}

#[async_trait]
impl GitHubClient for GitHubProvider {
    async fn fetch_stats(&self, username: &str) -> Result<GitHubStats, SourceError> {
        debug!(
            "GitHub request for '{}' (token configured: {})",
            username,
            self.token.is_some()
        );

        let (calendar, profile) =
            futures::try_join!(self.fetch_calendar(username), self.fetch_profile(username))?;

        Ok(normalize(profile, calendar, Utc::now().year()))
    }
}
