//! LeetCode statistics provider.
//!
//! Queries the public GraphQL endpoint for:
//! - accepted submission counts per difficulty
//! - profile ranking and avatar
//! - contest ranking (attended contests, rating, top percentage)
//!
//! The endpoint is unauthenticated. An unknown username comes back as a
//! successful response with `matchedUser: null`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::SourceError;
use crate::models::LeetCodeStats;
use crate::provider::{status_error, LeetCodeClient, BROWSER_USER_AGENT};

const GRAPHQL_URL: &str = "https://leetcode.com/graphql";
const PROVIDER_ID: &str = "LEETCODE";

const PROFILE_QUERY: &str = r#"
query getUserProfile($username: String!) {
  matchedUser(username: $username) {
    username
    submitStats {
      acSubmissionNum {
        difficulty
        count
      }
    }
    profile {
      ranking
      userAvatar
    }
  }
  userContestRanking(username: $username) {
    attendedContestsCount
    rating
    globalRanking
    totalParticipants
    topPercentage
  }
}
"#;

// ============================================================================
// API Request/Response Structures
// ============================================================================

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'static str,
    variables: Variables<'a>,
}

#[derive(Debug, Serialize)]
struct Variables<'a> {
    username: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<ProfileData>,
    // Note: an `errors` array accompanies `matchedUser: null`, but the null
    // user is the signal we act on.
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProfileData {
    matched_user: Option<MatchedUser>,
    user_contest_ranking: Option<ContestRanking>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchedUser {
    username: String,
    submit_stats: Option<SubmitStats>,
    profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubmitStats {
    #[serde(default)]
    ac_submission_num: Vec<DifficultyCount>,
}

#[derive(Debug, Deserialize)]
struct DifficultyCount {
    difficulty: String,
    count: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Profile {
    ranking: Option<u64>,
    user_avatar: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContestRanking {
    attended_contests_count: Option<u32>,
    rating: Option<f64>,
    top_percentage: Option<f64>,
    // Note: globalRanking and totalParticipants are requested but not mapped
}

// ============================================================================
// Normalization
// ============================================================================

#[derive(Debug, Default, PartialEq, Eq)]
struct DifficultyTotals {
    easy: u32,
    medium: u32,
    hard: u32,
    all: u32,
}

const DIFFICULTY_LABELS: [&str; 4] = ["Easy", "Medium", "Hard", "All"];

/// Picks the four known difficulty labels out of an unordered list.
/// Missing labels stay 0, unknown labels are skipped, and a repeated label
/// keeps its first count.
fn tally_difficulties(counts: &[DifficultyCount]) -> DifficultyTotals {
    let first = |label: &str| {
        counts
            .iter()
            .find(|entry| entry.difficulty == label)
            .map_or(0, |entry| entry.count)
    };

    for entry in counts {
        if !DIFFICULTY_LABELS.contains(&entry.difficulty.as_str()) {
            debug!("Ignoring unknown LeetCode difficulty label '{}'", entry.difficulty);
        }
    }

    DifficultyTotals {
        easy: first("Easy"),
        medium: first("Medium"),
        hard: first("Hard"),
        all: first("All"),
    }
}

fn normalize(data: ProfileData, requested: &str) -> Result<LeetCodeStats, SourceError> {
    let user = data
        .matched_user
        .ok_or_else(|| SourceError::UserNotFound(requested.to_string()))?;

    let totals = user
        .submit_stats
        .as_ref()
        .map(|s| tally_difficulties(&s.ac_submission_num))
        .unwrap_or_default();

    let (ranking, avatar) = match user.profile {
        Some(profile) => (
            profile.ranking.filter(|r| *r > 0),
            profile.user_avatar.filter(|a| !a.is_empty()),
        ),
        None => (None, None),
    };

    let contest = data.user_contest_ranking;
    let contests = contest
        .as_ref()
        .and_then(|c| c.attended_contests_count)
        .unwrap_or(0);
    let contest_rating = contest
        .as_ref()
        .and_then(|c| c.rating)
        .map(|r| r.round() as i64)
        .unwrap_or(0);
    let top_percentage = contest
        .as_ref()
        .and_then(|c| c.top_percentage)
        .filter(|p| *p != 0.0);

    Ok(LeetCodeStats {
        username: user.username,
        easy: totals.easy,
        medium: totals.medium,
        hard: totals.hard,
        total: totals.all,
        ranking,
        avatar,
        contests,
        contest_rating,
        top_percentage,
    })
}

// ============================================================================
// LeetCodeProvider
// ============================================================================

/// LeetCode GraphQL client.
pub struct LeetCodeProvider {
    client: Client,
    endpoint: String,
}

impl LeetCodeProvider {
    pub fn new() -> Self {
        Self::with_endpoint(GRAPHQL_URL)
    }

    /// Point the provider at a different GraphQL endpoint.
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(BROWSER_USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

impl Default for LeetCodeProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeetCodeClient for LeetCodeProvider {
    async fn fetch_stats(&self, username: &str) -> Result<LeetCodeStats, SourceError> {
        debug!("LeetCode request for '{}'", username);

        let body = GraphQlRequest {
            query: PROFILE_QUERY,
            variables: Variables { username },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| SourceError::from_request(PROVIDER_ID, e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(status_error(PROVIDER_ID, status, &text));
        }

        let payload: GraphQlResponse = response
            .json()
            .await
            .map_err(|e| SourceError::provider(PROVIDER_ID, format!("Invalid response: {}", e)))?;

        let data = payload
            .data
            .ok_or_else(|| SourceError::UserNotFound(username.to_string()))?;

        normalize(data, username)
    }
}
