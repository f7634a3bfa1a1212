use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, State},
    http::request::Parts,
    routing::get,
    Json, Router,
};
use devstats_sources::{GitHubStats, LeetCodeStats};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{format_timestamp, SourceResponse},
};

pub const LEETCODE_FAILURE: &str = "Failed to fetch LeetCode data";
pub const GITHUB_FAILURE: &str = "Failed to fetch GitHub data";

/// `{username}` path segment; malformed segments answer with the JSON envelope.
pub struct UsernamePath(pub String);

impl<S: Send + Sync> FromRequestParts<S> for UsernamePath {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(username) = Path::<String>::from_request_parts(parts, state).await?;
        Ok(Self(username))
    }
}

async fn get_leetcode_stats(
    UsernamePath(username): UsernamePath,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SourceResponse<LeetCodeStats>>> {
    let fetched = state
        .stats_service
        .get_leetcode_stats(&username)
        .await
        .map_err(|e| ApiError::from_core(e, LEETCODE_FAILURE))?;
    let timestamp = format_timestamp(state.clock.now());
    Ok(Json(SourceResponse::new(fetched, timestamp)))
}

async fn get_github_stats(
    UsernamePath(username): UsernamePath,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SourceResponse<GitHubStats>>> {
    let fetched = state
        .stats_service
        .get_github_stats(&username)
        .await
        .map_err(|e| ApiError::from_core(e, GITHUB_FAILURE))?;
    let timestamp = format_timestamp(state.clock.now());
    Ok(Json(SourceResponse::new(fetched, timestamp)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/leetcode/{username}", get(get_leetcode_stats))
        .route("/github/{username}", get(get_github_stats))
}
