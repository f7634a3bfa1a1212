//! Background sweep of expired cache entries.
//!
//! Reads already treat expired entries as absent; the sweep only frees
//! memory held by keys nobody asks for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::main_lib::AppState;

/// Starts the periodic cache sweep.
pub fn start_cache_sweeper(state: Arc<AppState>, period: Duration) {
    tokio::spawn(async move {
        info!("Cache sweeper started ({}s interval)", period.as_secs());

        let mut sweep_interval = interval(period);
        sweep_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately and there is nothing to sweep yet.
        sweep_interval.tick().await;

        loop {
            sweep_interval.tick().await;
            run_sweep(&state);
        }
    });
}

fn run_sweep(state: &AppState) {
    let removed = state.cache.sweep_expired();
    if removed > 0 {
        info!("Cache sweep removed {} expired entries", removed);
    } else {
        debug!("Cache sweep found nothing to remove");
    }
}
