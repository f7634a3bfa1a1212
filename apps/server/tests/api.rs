use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use devstats_core::ManualClock;
use devstats_server::{api::app_router, build_state_with, config::Config};
use devstats_sources::{
    reshape_weeks, ContributionDay, ContributionSummary, GitHubClient, GitHubStats,
    LeetCodeClient, LeetCodeStats, SourceError,
};
use serde_json::Value;
use tower::ServiceExt;

// =============================================================================
// Fake upstreams
// =============================================================================

#[derive(Default)]
struct FakeLeetCode {
    calls: AtomicUsize,
    down: bool,
    delay: Duration,
}

#[async_trait]
impl LeetCodeClient for FakeLeetCode {
    async fn fetch_stats(&self, username: &str) -> Result<LeetCodeStats, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        if self.down {
            return Err(SourceError::ProviderError {
                provider: "LEETCODE".to_string(),
                message: "HTTP 502 Bad Gateway".to_string(),
            });
        }
        if username == "ghost_user_404" {
            return Err(SourceError::UserNotFound(username.to_string()));
        }
        Ok(LeetCodeStats {
            username: username.to_string(),
            easy: 120,
            medium: 80,
            hard: 15,
            total: 215,
            ranking: Some(98_765),
            avatar: Some("https://assets.leetcode.com/avatar.png".to_string()),
            contests: 4,
            contest_rating: 1620,
            top_percentage: Some(22.5),
        })
    }
}

#[derive(Default)]
struct FakeGitHub {
    calls: AtomicUsize,
}

#[async_trait]
impl GitHubClient for FakeGitHub {
    async fn fetch_stats(&self, username: &str) -> Result<GitHubStats, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let last_year: Vec<ContributionDay> = (1..=10)
            .map(|d| ContributionDay {
                date: format!("2024-01-{d:02}"),
                count: d,
                level: 1,
            })
            .collect();
        Ok(GitHubStats {
            username: username.to_string(),
            name: Some("Test User".to_string()),
            avatar: None,
            bio: Some("builds things".to_string()),
            public_repos: 12,
            followers: 34,
            following: 5,
            contributions: ContributionSummary {
                total: 55,
                weeks: reshape_weeks(&last_year),
                last_year,
            },
        })
    }
}

struct TestApp {
    router: Router,
    clock: Arc<ManualClock>,
    leetcode: Arc<FakeLeetCode>,
    github: Arc<FakeGitHub>,
}

fn build_test_app(leetcode: FakeLeetCode) -> TestApp {
    build_test_app_with(Config::default(), leetcode)
}

fn build_test_app_with(config: Config, leetcode: FakeLeetCode) -> TestApp {
    let clock = Arc::new(ManualClock::default());
    let leetcode = Arc::new(leetcode);
    let github = Arc::new(FakeGitHub::default());
    let state = build_state_with(&config, leetcode.clone(), github.clone(), clock.clone());
    TestApp {
        router: app_router(state, &config),
        clock,
        leetcode,
        github,
    }
}

async fn send(router: &Router, method: Method, uri: &str) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri).await
}

// =============================================================================
// Per-source endpoints
// =============================================================================

#[tokio::test]
async fn leetcode_second_request_is_cached() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, first) = get(&app.router, "/api/leetcode/alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["success"], true);
    assert_eq!(first["cached"], false);
    assert_eq!(first["data"]["username"], "alice");
    assert_eq!(first["data"]["contestRating"], 1620);
    assert!(first["timestamp"].as_str().unwrap().ends_with('Z'));

    let (status, second) = get(&app.router, "/api/leetcode/alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["cached"], true);
    assert_eq!(second["data"], first["data"]);
    assert_eq!(app.leetcode.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn leetcode_unknown_user_is_404() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(&app.router, "/api/leetcode/ghost_user_404").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn leetcode_upstream_failure_is_500() {
    let app = build_test_app(FakeLeetCode {
        down: true,
        ..Default::default()
    });

    let (status, body) = get(&app.router, "/api/leetcode/alice").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to fetch LeetCode data");
    assert!(body["message"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn invalid_username_is_400() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(&app.router, "/api/github/bad%20name").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(app.github.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn github_returns_week_grid() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(&app.router, "/api/github/octocat").await;
    assert_eq!(status, StatusCode::OK);
    let weeks = body["data"]["contributions"]["weeks"].as_array().unwrap();
    assert_eq!(weeks.len(), 53);
    assert!(weeks.iter().all(|w| w.as_array().unwrap().len() == 7));
    assert_eq!(weeks[1][3]["date"], Value::Null);
    assert_eq!(weeks[1][2]["date"], "2024-01-10");
    assert_eq!(body["data"]["publicRepos"], 12);
}

#[tokio::test]
async fn expired_entry_is_refetched_once() {
    let app = build_test_app(FakeLeetCode::default());

    get(&app.router, "/api/github/octocat").await;
    app.clock.advance(Duration::from_secs(24 * 60 * 60));

    let (_, refreshed) = get(&app.router, "/api/github/octocat").await;
    assert_eq!(refreshed["cached"], false);
    let (_, again) = get(&app.router, "/api/github/octocat").await;
    assert_eq!(again["cached"], true);
    assert_eq!(app.github.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn undecodable_username_is_400_envelope() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(&app.router, "/api/leetcode/%FF").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid username");
    assert_eq!(app.leetcode.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn slow_source_times_out_with_envelope() {
    let config = Config {
        request_timeout: Duration::from_millis(100),
        ..Config::default()
    };
    let app = build_test_app_with(
        config,
        FakeLeetCode {
            delay: Duration::from_millis(500),
            ..Default::default()
        },
    );

    let (status, body) = get(&app.router, "/api/leetcode/alice").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Request timed out");
    assert_eq!(body["message"], "No response within 100 ms");
}

// =============================================================================
// Combined endpoint
// =============================================================================

#[tokio::test]
async fn combined_keeps_fast_slot_when_other_source_is_slow() {
    let config = Config {
        request_timeout: Duration::from_millis(100),
        ..Config::default()
    };
    let app = build_test_app_with(
        config,
        FakeLeetCode {
            delay: Duration::from_millis(500),
            ..Default::default()
        },
    );

    let (status, body) = get(&app.router, "/api/stats/alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["github"]["success"], true);
    assert_eq!(body["github"]["data"]["username"], "alice");
    assert_eq!(body["leetcode"]["success"], true);
}

#[tokio::test]
async fn combined_repeated_override_is_400_envelope() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(
        &app.router,
        "/api/stats/alice?leetcodeUsername=a&leetcodeUsername=b",
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Invalid request");
    assert_eq!(app.github.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn combined_isolates_failing_source() {
    let app = build_test_app(FakeLeetCode {
        down: true,
        ..Default::default()
    });

    let (status, body) = get(&app.router, "/api/stats/alice").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["leetcode"]["success"], false);
    assert_eq!(body["leetcode"]["error"], "Failed to fetch LeetCode data");
    assert_eq!(body["github"]["success"], true);
    assert_eq!(body["github"]["data"]["username"], "alice");
}

#[tokio::test]
async fn combined_honors_username_overrides() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(
        &app.router,
        "/api/stats/shared?leetcodeUsername=lc_handle&githubUsername=gh-handle",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leetcode"]["data"]["username"], "lc_handle");
    assert_eq!(body["github"]["data"]["username"], "gh-handle");
}

#[tokio::test]
async fn combined_reports_not_found_inside_slot() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(&app.router, "/api/stats/ghost_user_404").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["leetcode"]["error"], "User not found");
    assert_eq!(body["github"]["success"], true);
}

// =============================================================================
// Cache admin, status, fallback
// =============================================================================

#[tokio::test]
async fn cache_stats_and_clear() {
    let app = build_test_app(FakeLeetCode::default());

    get(&app.router, "/api/leetcode/alice").await;
    get(&app.router, "/api/leetcode/alice").await;
    get(&app.router, "/api/github/alice").await;

    let (status, stats) = get(&app.router, "/api/cache/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["totalCached"], 2);
    assert_eq!(
        stats["keys"],
        serde_json::json!(["github_alice", "leetcode_alice"])
    );
    assert_eq!(stats["stats"]["hits"], 1);
    assert_eq!(stats["stats"]["misses"], 2);

    let (status, cleared) = send(&app.router, Method::POST, "/api/cache/clear").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cleared["success"], true);
    assert_eq!(cleared["message"], "Cache cleared");

    let (_, stats) = get(&app.router, "/api/cache/stats").await;
    assert_eq!(stats["totalCached"], 0);

    let (_, after) = get(&app.router, "/api/leetcode/alice").await;
    assert_eq!(after["cached"], false);
}

#[tokio::test]
async fn status_lists_endpoints() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "online");
    assert_eq!(body["environment"], "development");
    assert_eq!(body["endpoints"]["combined"], "GET /api/stats/:username");
}

#[tokio::test]
async fn unknown_route_is_404_with_directory() {
    let app = build_test_app(FakeLeetCode::default());

    let (status, body) = get(&app.router, "/api/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Endpoint not found");
    assert_eq!(
        body["availableEndpoints"]["leetcode"],
        "GET /api/leetcode/:username"
    );
}
