use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Query, State},
    http::request::Parts,
    routing::get,
    Json, Router,
};
use devstats_sources::{GitHubStats, LeetCodeStats};
use serde::Deserialize;

use super::sources::{UsernamePath, GITHUB_FAILURE, LEETCODE_FAILURE};
use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{format_timestamp, CombinedResponse, SourceSlot},
};

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct CombinedQuery {
    leetcode_username: Option<String>,
    github_username: Option<String>,
}

struct CombinedParams(CombinedQuery);

impl<S: Send + Sync> FromRequestParts<S> for CombinedParams {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<CombinedQuery>::from_request_parts(parts, state).await?;
        Ok(Self(query))
    }
}

/// Both sources in one response. A failing source only fails its own slot.
async fn get_combined_stats(
    UsernamePath(username): UsernamePath,
    CombinedParams(query): CombinedParams,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<CombinedResponse<LeetCodeStats, GitHubStats>>> {
    let combined = state
        .stats_service
        .get_combined_stats(
            &username,
            query.leetcode_username.as_deref(),
            query.github_username.as_deref(),
        )
        .await
        .map_err(|e| ApiError::from_core(e, "Failed to fetch combined stats"))?;

    let timestamp = format_timestamp(state.clock.now());
    Ok(Json(CombinedResponse {
        success: true,
        leetcode: SourceSlot::from_result(combined.leetcode, LEETCODE_FAILURE, &timestamp),
        github: SourceSlot::from_result(combined.github, GITHUB_FAILURE, &timestamp),
        timestamp,
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/stats/{username}", get(get_combined_stats))
}
