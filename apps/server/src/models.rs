use chrono::{DateTime, SecondsFormat, Utc};
use devstats_core::{CacheStats, Fetched};
use serde::Serialize;

use crate::error::{ApiError, ErrorBody};

/// Formats a timestamp the way every response envelope carries it.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Serialize, Debug)]
pub struct SourceResponse<T> {
    pub success: bool,
    pub data: T,
    pub cached: bool,
    pub timestamp: String,
}

impl<T> SourceResponse<T> {
    pub fn new(fetched: Fetched<T>, timestamp: String) -> Self {
        Self {
            success: true,
            data: fetched.data,
            cached: fetched.cached,
            timestamp,
        }
    }
}

/// One source's slot in the combined response: the same body its own
/// endpoint would have returned.
#[derive(Serialize, Debug)]
#[serde(untagged)]
pub enum SourceSlot<T> {
    Success(SourceResponse<T>),
    Failure(ErrorBody),
}

impl<T> SourceSlot<T> {
    pub fn from_result(
        result: devstats_core::Result<Fetched<T>>,
        context: &'static str,
        timestamp: &str,
    ) -> Self {
        match result {
            Ok(fetched) => SourceSlot::Success(SourceResponse::new(fetched, timestamp.to_string())),
            Err(err) => SourceSlot::Failure(ApiError::from_core(err, context).body()),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct CombinedResponse<L, G> {
    pub success: bool,
    pub leetcode: SourceSlot<L>,
    pub github: SourceSlot<G>,
    pub timestamp: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    pub total_cached: usize,
    pub keys: Vec<String>,
    pub stats: CacheStats,
}

#[derive(Serialize, Debug)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Serialize, Debug, Clone, Copy)]
pub struct EndpointDirectory {
    pub leetcode: &'static str,
    pub github: &'static str,
    pub combined: &'static str,
    #[serde(rename = "cacheStats")]
    pub cache_stats: &'static str,
    #[serde(rename = "cacheClear")]
    pub cache_clear: &'static str,
}

pub const ENDPOINTS: EndpointDirectory = EndpointDirectory {
    leetcode: "GET /api/leetcode/:username",
    github: "GET /api/github/:username",
    combined: "GET /api/stats/:username",
    cache_stats: "GET /api/cache/stats",
    cache_clear: "POST /api/cache/clear",
};

#[derive(Serialize, Debug)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
    pub environment: String,
    pub endpoints: EndpointDirectory,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RouteNotFoundResponse {
    pub success: bool,
    pub error: &'static str,
    pub available_endpoints: EndpointDirectory,
}
