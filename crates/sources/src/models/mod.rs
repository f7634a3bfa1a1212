//! Normalized record types shared by the providers and the cache.

mod github;
mod leetcode;
mod source;

pub use github::{CalendarDay, ContributionDay, ContributionSummary, GitHubStats};
pub use leetcode::LeetCodeStats;
pub use source::Source;
