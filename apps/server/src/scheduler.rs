//! Background twice-daily refresh trigger.
//!
//! Deployments fronted by an external cron (the original setup) can disable
//! this with `GR_SCHEDULER_ENABLED=false` and hit `/api/cron/update-prices`
//! instead. A failed run is not retried; the next slot is the retry.

use std::sync::Arc;

use chrono::Utc;
use tokio::time::{sleep, Duration};
use tracing::{info, warn};

use goldrate_core::constants::REFRESH_TIMEZONE;
use goldrate_core::schedule::next_refresh_after;

use crate::main_lib::AppState;

/// Wake slack so a tick never lands just before its slot due to clock drift.
const WAKE_SLACK: Duration = Duration::from_secs(1);

pub fn start_refresh_scheduler(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!(
            "Refresh scheduler started (17:00 and 23:30 {})",
            REFRESH_TIMEZONE
        );

        loop {
            let now = Utc::now();
            let next = next_refresh_after(now, REFRESH_TIMEZONE);
            let wait = (next - now).to_std().unwrap_or(Duration::ZERO) + WAKE_SLACK;
            info!("Next scheduled refresh at {}", next);
            sleep(wait).await;

            match state.price_service.refresh().await {
                Ok(snapshot) => info!(
                    "Scheduled refresh completed (update #{})",
                    snapshot.update_count
                ),
                Err(err) => warn!("Scheduled refresh failed: {}", err),
            }
        }
    });
}
