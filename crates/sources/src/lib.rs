//! Devstats upstream sources crate
//!
//! This crate talks to the third-party providers that supply a user's
//! coding statistics and normalizes their responses into fixed record shapes.
//!
//! # Overview
//!
//! - [`LeetCodeProvider`] queries the LeetCode GraphQL API for solved-problem
//!   counts and contest ranking.
//! - [`GitHubProvider`] combines the public GitHub profile with a
//!   contribution calendar service.
//! - [`reshape_weeks`] turns a flat daily contribution sequence into the
//!   fixed 53x7 grid used for calendar rendering.
//!
//! # Architecture
//!
//! ```text
//! +-------------------+     +-------------------+
//! |  LeetCodeClient   |     |   GitHubClient    |  (traits, faked in tests)
//! +-------------------+     +-------------------+
//!          |                          |
//!          v                          v
//! +-------------------+     +-------------------+
//! | LeetCodeProvider  |     |  GitHubProvider   |  (reqwest)
//! +-------------------+     +-------------------+
//!          |                          |
//!          v                          v
//! +-------------------+     +-------------------+
//! |  LeetCodeStats    |     |   GitHubStats     |  (normalized records)
//! +-------------------+     +-------------------+
//! ```

pub mod contributions;
pub mod errors;
pub mod models;
pub mod provider;

pub use contributions::{reshape_weeks, DAYS_PER_WEEK, WEEKS_PER_GRID};
pub use errors::SourceError;
pub use models::{
    CalendarDay, ContributionDay, ContributionSummary, GitHubStats, LeetCodeStats, Source,
};
pub use provider::github::GitHubProvider;
pub use provider::leetcode::LeetCodeProvider;
pub use provider::{GitHubClient, LeetCodeClient};
