//! Upstream provider clients.

pub mod github;
pub mod leetcode;
mod traits;

use reqwest::StatusCode;
use tracing::warn;

use crate::errors::SourceError;

pub use traits::{GitHubClient, LeetCodeClient};

/// Browser-like agent; the LeetCode GraphQL endpoint rejects bare clients.
pub(crate) const BROWSER_USER_AGENT: &str = "Mozilla/5.0";

/// Number of body characters kept when logging a failed upstream response.
const LOGGED_BODY_CHARS: usize = 256;

/// Builds the error for a non-2xx upstream answer.
///
/// The body only goes to the log, cut to a short prefix. The error carries
/// the status line alone.
pub(crate) fn status_error(provider: &str, status: StatusCode, body: &str) -> SourceError {
    let prefix: String = body.chars().take(LOGGED_BODY_CHARS).collect();
    warn!("{} returned HTTP {}: {}", provider, status, prefix);
    SourceError::provider(provider, format!("HTTP {}", status))
}
