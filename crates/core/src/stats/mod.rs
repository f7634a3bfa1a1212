//! Read-through retrieval of per-source statistics and the combined view.

mod stats_model;
mod stats_service;
mod stats_traits;

pub use stats_model::{validate_username, CombinedStats, Fetched};
pub use stats_service::StatsService;
pub use stats_traits::StatsServiceTrait;
