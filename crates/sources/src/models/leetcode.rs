use serde::{Deserialize, Serialize};

/// Solved-problem and contest statistics for a LeetCode user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeetCodeStats {
    pub username: String,
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
    pub total: u32,
    /// Global profile ranking, absent for unranked users.
    pub ranking: Option<u64>,
    pub avatar: Option<String>,
    /// Number of contests attended.
    pub contests: u32,
    /// Contest rating rounded to the nearest integer, 0 without contest history.
    pub contest_rating: i64,
    pub top_percentage: Option<f64>,
}
